//! Content backend interface
//!
//! The generator core is written against [`ContentSource`], an abstract
//! fetch-by-uid / query service. The production implementation talks to
//! a Prismic-style REST API; tests substitute an in-memory source.

pub mod prismic;

use async_trait::async_trait;
use thiserror::Error;

use crate::content::ApiDocument;

/// Errors from the content backend
///
/// All variants propagate uncaught to the caller: a failed build step or
/// a failed on-demand request, never a silently empty page.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Transport-level failure talking to the API
    #[error("content API request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered but the payload was not usable
    #[error("content API error: {0}")]
    Api(String),

    /// No document with the requested uid
    #[error("document not found: {document_type}/{uid}")]
    NotFound { document_type: String, uid: String },
}

/// Options for a document listing query
#[derive(Debug, Clone, Default)]
pub struct QueryOptions {
    /// Maximum number of documents to return
    pub page_size: usize,

    /// Fields to fetch, e.g. `posts.uid`; empty fetches full documents
    pub fetch: Vec<String>,
}

/// A queryable source of content documents
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// List documents of a type
    async fn query(
        &self,
        document_type: &str,
        options: &QueryOptions,
    ) -> Result<Vec<ApiDocument>, BackendError>;

    /// Fetch the single document with the given uid
    async fn get_by_uid(
        &self,
        document_type: &str,
        uid: &str,
    ) -> Result<ApiDocument, BackendError>;
}
