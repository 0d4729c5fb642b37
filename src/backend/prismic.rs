//! Prismic REST API v2 client
//!
//! Every search request must carry the repository's current master ref,
//! so each fetch first resolves it from the API root endpoint.

use async_trait::async_trait;
use serde::Deserialize;

use super::{BackendError, ContentSource, QueryOptions};
use crate::content::ApiDocument;

/// Client for a Prismic-style repository
#[derive(Debug, Clone)]
pub struct PrismicClient {
    http: reqwest::Client,
    api_url: String,
    access_token: Option<String>,
}

/// Repository metadata returned by the API root endpoint
#[derive(Debug, Deserialize)]
struct ApiInfo {
    refs: Vec<ApiRef>,
}

#[derive(Debug, Deserialize)]
struct ApiRef {
    #[serde(rename = "ref")]
    reference: String,
    #[serde(rename = "isMasterRef", default)]
    is_master: bool,
}

/// Envelope of a `/documents/search` response
#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    results: Vec<ApiDocument>,
}

impl PrismicClient {
    /// Create a client for the given repository endpoint
    pub fn new(api_url: &str, access_token: Option<&str>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url: api_url.trim_end_matches('/').to_string(),
            access_token: access_token.map(|t| t.to_string()),
        }
    }

    /// Resolve the repository's master ref
    async fn master_ref(&self) -> Result<String, BackendError> {
        let mut request = self.http.get(&self.api_url);
        if let Some(token) = &self.access_token {
            request = request.query(&[("access_token", token)]);
        }

        let info: ApiInfo = request
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        info.refs
            .into_iter()
            .find(|r| r.is_master)
            .map(|r| r.reference)
            .ok_or_else(|| BackendError::Api("repository has no master ref".to_string()))
    }

    /// Run one search query against the repository
    async fn search(
        &self,
        predicate: &str,
        page_size: usize,
        fetch: &[String],
    ) -> Result<Vec<ApiDocument>, BackendError> {
        let reference = self.master_ref().await?;
        let url = format!("{}/documents/search", self.api_url);

        let mut request = self
            .http
            .get(&url)
            .query(&[("ref", reference.as_str()), ("q", predicate)])
            .query(&[("pageSize", page_size)]);

        if !fetch.is_empty() {
            request = request.query(&[("fetch", fetch.join(","))]);
        }
        if let Some(token) = &self.access_token {
            request = request.query(&[("access_token", token)]);
        }

        let response: QueryResponse = request
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(response.results)
    }
}

#[async_trait]
impl ContentSource for PrismicClient {
    async fn query(
        &self,
        document_type: &str,
        options: &QueryOptions,
    ) -> Result<Vec<ApiDocument>, BackendError> {
        let predicate = type_predicate(document_type);
        self.search(&predicate, options.page_size, &options.fetch)
            .await
    }

    async fn get_by_uid(
        &self,
        document_type: &str,
        uid: &str,
    ) -> Result<ApiDocument, BackendError> {
        let predicate = uid_predicate(document_type, uid);
        let mut results = self.search(&predicate, 1, &[]).await?;

        if results.is_empty() {
            return Err(BackendError::NotFound {
                document_type: document_type.to_string(),
                uid: uid.to_string(),
            });
        }
        Ok(results.remove(0))
    }
}

/// Predicate selecting all documents of a type
fn type_predicate(document_type: &str) -> String {
    format!(r#"[[at(document.type,"{}")]]"#, document_type)
}

/// Predicate selecting one document by uid
fn uid_predicate(document_type: &str, uid: &str) -> String {
    format!(r#"[[at(my.{}.uid,"{}")]]"#, document_type, uid)
}
