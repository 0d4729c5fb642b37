//! Generator core
//!
//! The two entry points the outer scheduler (CLI build or preview
//! server) drives, in order: [`enumerate_paths`] once per build, then
//! [`assemble`] + [`render`] once per slug. Both are stateless over an
//! abstract [`ContentSource`], so independent slugs may be generated
//! concurrently.

use anyhow::Result;
use serde::Serialize;
use tera::Context;

use crate::backend::{BackendError, ContentSource, QueryOptions};
use crate::config::SiteConfig;
use crate::content::Post;
use crate::helpers::date;
use crate::helpers::html::{html_escape, strip_html, truncate};
use crate::templates::TemplateRenderer;

/// Length of the meta description derived from the first section
const DESCRIPTION_LENGTH: usize = 160;

/// Route parameters for one pre-rendered page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathParams {
    pub slug: String,
}

/// Policy for slugs missing from the enumerated path set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    /// Generate on demand, blocking the response, then persist the page
    /// as a newly static path
    Blocking,
}

/// The static path set produced once per build
#[derive(Debug, Clone)]
pub struct StaticPaths {
    pub paths: Vec<PathParams>,
    pub fallback: Fallback,
}

/// Props handed to the page renderer
#[derive(Debug, Clone)]
pub struct PostProps {
    pub post: Post,
}

/// Enumerate the slugs to pre-render
///
/// Asks the backend for one page of post identifiers, fetching only the
/// uid field. A query failure propagates to the caller untouched; there
/// is no retry or partial-result policy at this layer.
pub async fn enumerate_paths(
    source: &dyn ContentSource,
    document_type: &str,
    page_size: usize,
) -> Result<StaticPaths, BackendError> {
    let options = QueryOptions {
        page_size,
        fetch: vec![format!("{}.uid", document_type)],
    };

    let documents = source.query(document_type, &options).await?;
    let paths = documents
        .into_iter()
        .map(|d| PathParams { slug: d.uid })
        .collect();

    Ok(StaticPaths {
        paths,
        fallback: Fallback::Blocking,
    })
}

/// Fetch one document and normalize it into page props
///
/// A missing document is an error, never a silently empty page.
pub async fn assemble(
    source: &dyn ContentSource,
    document_type: &str,
    slug: &str,
) -> Result<PostProps, BackendError> {
    let document = source.get_by_uid(document_type, slug).await?;
    Ok(PostProps {
        post: Post::from_document(document),
    })
}

/// Render one post page to HTML
///
/// Pure over the props: derived display fields (formatted date, reading
/// time, section HTML) are computed here and handed to the template.
pub fn render(
    renderer: &TemplateRenderer,
    config: &SiteConfig,
    props: &PostProps,
) -> Result<String> {
    let post = &props.post;

    let sections: Vec<SectionData> = post
        .content
        .iter()
        .map(|s| SectionData {
            heading: html_escape(&s.heading),
            html: s.body.as_html(),
        })
        .collect();

    let description = sections
        .first()
        .map(|s| truncate(&strip_html(&s.html), DESCRIPTION_LENGTH, None))
        .unwrap_or_default();

    let mut context = base_context(config);
    context.insert("post_title", &html_escape(&post.title));
    context.insert("banner_url", &html_escape(&post.banner_url));
    context.insert("author", &html_escape(&post.author));
    context.insert(
        "formatted_date",
        &date::format_publication_date(post.first_publication_date.as_ref()),
    );
    context.insert(
        "datetime",
        &date::date_attribute(post.first_publication_date.as_ref()),
    );
    context.insert("reading_time", &post.reading_time());
    context.insert("description", &description);
    context.insert("sections", &sections);

    renderer.render("post.html", &context)
}

/// Render the transitional loading placeholder
///
/// Served while fallback-triggered generation is still in flight for a
/// not-yet-statically-known slug.
pub fn render_loading(renderer: &TemplateRenderer, config: &SiteConfig) -> Result<String> {
    renderer.render("loading.html", &base_context(config))
}

/// Context variables every template expects
fn base_context(config: &SiteConfig) -> Context {
    let mut context = Context::new();
    context.insert("lang", &config.language);
    context.insert("root", &config.root);
    context.insert("site_title", &html_escape(&config.title));
    context
}

/// One section as the template sees it: escaped heading plus rendered
/// body HTML, identified by position in the template loop
#[derive(Debug, Clone, Serialize)]
struct SectionData {
    heading: String,
    html: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::testing::StaticSource;
    use crate::content::richtext::{NodeKind, RichText, RichTextNode};
    use crate::content::{ApiDocument, Banner, DocumentData, RawSection};
    use chrono::TimeZone;

    fn paragraph(text: &str) -> RichTextNode {
        RichTextNode {
            kind: NodeKind::Paragraph,
            text: text.to_string(),
            spans: Vec::new(),
            url: None,
            alt: None,
        }
    }

    fn sample_document(uid: &str) -> ApiDocument {
        ApiDocument {
            uid: uid.to_string(),
            first_publication_date: Some(
                chrono::Utc.with_ymd_and_hms(2021, 5, 19, 12, 0, 0).unwrap(),
            ),
            data: DocumentData {
                title: format!("Title of {}", uid),
                subtitle: "subtitle".to_string(),
                author: "Joseph Oliveira".to_string(),
                banner: Banner {
                    url: "https://images.example.com/banner.png".to_string(),
                },
                content: vec![
                    RawSection {
                        heading: "A".to_string(),
                        body: RichText(vec![paragraph("first section text")]),
                    },
                    RawSection {
                        heading: "B".to_string(),
                        body: RichText(vec![paragraph("second section text")]),
                    },
                ],
            },
        }
    }

    fn source_with(uids: &[&str]) -> StaticSource {
        StaticSource {
            documents: uids.iter().map(|u| sample_document(u)).collect(),
        }
    }

    #[tokio::test]
    async fn test_enumerate_paths() {
        let source = source_with(&["post-1", "post-2"]);
        let static_paths = enumerate_paths(&source, "posts", 2).await.unwrap();

        let slugs: Vec<_> = static_paths.paths.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["post-1", "post-2"]);
        assert_eq!(static_paths.fallback, Fallback::Blocking);
    }

    #[tokio::test]
    async fn test_enumerate_paths_respects_page_size() {
        let source = source_with(&["post-1", "post-2", "post-3"]);
        let static_paths = enumerate_paths(&source, "posts", 2).await.unwrap();
        assert_eq!(static_paths.paths.len(), 2);
    }

    #[tokio::test]
    async fn test_assemble_maps_document() {
        let source = source_with(&["post-1"]);
        let props = assemble(&source, "posts", "post-1").await.unwrap();
        assert_eq!(props.post.slug, "post-1");
        assert_eq!(props.post.content.len(), 2);
    }

    #[tokio::test]
    async fn test_assemble_missing_slug_fails() {
        let source = source_with(&["post-1"]);
        let result = assemble(&source, "posts", "no-such-post").await;
        assert!(matches!(result, Err(BackendError::NotFound { .. })));
    }

    #[test]
    fn test_render_keeps_section_order() {
        let renderer = TemplateRenderer::new().unwrap();
        let config = SiteConfig::default();
        let props = PostProps {
            post: Post::from_document(sample_document("post-1")),
        };

        let html = render(&renderer, &config, &props).unwrap();
        let pos_a = html.find("<h2>A</h2>").unwrap();
        let pos_b = html.find("<h2>B</h2>").unwrap();
        assert!(pos_a < pos_b);
    }

    #[test]
    fn test_render_derived_fields() {
        let renderer = TemplateRenderer::new().unwrap();
        let config = SiteConfig::default();
        let props = PostProps {
            post: Post::from_document(sample_document("post-1")),
        };

        let html = render(&renderer, &config, &props).unwrap();
        assert!(html.contains("19 mai 2021"));
        assert!(html.contains("1 min"));
        assert!(html.contains("Joseph Oliveira"));
        assert!(html.contains(r#"src="https://images.example.com/banner.png""#));
        // Subtitle is fetched but never rendered
        assert!(!html.contains("subtitle"));
    }

    #[test]
    fn test_render_unpublished_placeholder() {
        let renderer = TemplateRenderer::new().unwrap();
        let config = SiteConfig::default();
        let mut document = sample_document("post-1");
        document.first_publication_date = None;
        let props = PostProps {
            post: Post::from_document(document),
        };

        let html = render(&renderer, &config, &props).unwrap();
        assert!(html.contains("não publicado"));
    }

    #[test]
    fn test_render_loading() {
        let renderer = TemplateRenderer::new().unwrap();
        let config = SiteConfig::default();
        let html = render_loading(&renderer, &config).unwrap();
        assert!(html.contains("Carregando..."));
    }
}
