//! Generate static post pages

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::backend::ContentSource;
use crate::generator;
use crate::templates::TemplateRenderer;
use crate::Prismo;

/// Generate every enumerated post page
pub async fn run(prismo: &Prismo) -> Result<()> {
    let client = prismo.client();
    run_with_source(prismo, &client).await
}

/// Generate against an explicit content source
pub async fn run_with_source(prismo: &Prismo, source: &dyn ContentSource) -> Result<()> {
    let start = std::time::Instant::now();
    let renderer = TemplateRenderer::new()?;
    let document_type = &prismo.config.backend.document_type;

    let static_paths = generator::enumerate_paths(
        source,
        document_type,
        prismo.config.backend.page_size,
    )
    .await?;
    tracing::info!("Enumerated {} post paths", static_paths.paths.len());

    fs::create_dir_all(&prismo.public_dir)?;

    for params in &static_paths.paths {
        let props = generator::assemble(source, document_type, &params.slug).await?;
        let html = generator::render(&renderer, &prismo.config, &props)?;
        write_post_page(prismo, &params.slug, &html)?;
    }

    let duration = start.elapsed();
    tracing::info!(
        "Generated {} pages in {:.2}s",
        static_paths.paths.len(),
        duration.as_secs_f64()
    );

    Ok(())
}

/// Write one rendered page under `public/post/<slug>/index.html`
pub fn write_post_page(prismo: &Prismo, slug: &str, html: &str) -> Result<PathBuf> {
    let output_path = prismo
        .public_dir
        .join("post")
        .join(slug)
        .join("index.html");

    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&output_path, html)?;
    tracing::debug!("Generated post: {:?}", output_path);

    Ok(output_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::testing::StaticSource;
    use crate::content::richtext::{NodeKind, RichText, RichTextNode};
    use crate::content::{ApiDocument, Banner, DocumentData, RawSection};

    fn sample_document(uid: &str) -> ApiDocument {
        ApiDocument {
            uid: uid.to_string(),
            first_publication_date: None,
            data: DocumentData {
                title: format!("Title of {}", uid),
                subtitle: String::new(),
                author: "Author".to_string(),
                banner: Banner::default(),
                content: vec![RawSection {
                    heading: "Intro".to_string(),
                    body: RichText(vec![RichTextNode {
                        kind: NodeKind::Paragraph,
                        text: "hello world".to_string(),
                        spans: Vec::new(),
                        url: None,
                        alt: None,
                    }]),
                }],
            },
        }
    }

    fn prismo_in(dir: &std::path::Path) -> Prismo {
        Prismo::new(dir).unwrap()
    }

    #[tokio::test]
    async fn test_run_writes_one_page_per_path() {
        let dir = tempfile::tempdir().unwrap();
        let prismo = prismo_in(dir.path());
        let source = StaticSource {
            documents: vec![sample_document("post-1"), sample_document("post-2")],
        };

        run_with_source(&prismo, &source).await.unwrap();

        for slug in ["post-1", "post-2"] {
            let page = prismo.public_dir.join("post").join(slug).join("index.html");
            let html = fs::read_to_string(&page).unwrap();
            assert!(html.contains(&format!("Title of {}", slug)));
        }
    }

    #[tokio::test]
    async fn test_run_respects_page_size() {
        let dir = tempfile::tempdir().unwrap();
        let prismo = prismo_in(dir.path());
        // Default page size is 2; the third document is not enumerated
        let source = StaticSource {
            documents: vec![
                sample_document("post-1"),
                sample_document("post-2"),
                sample_document("post-3"),
            ],
        };

        run_with_source(&prismo, &source).await.unwrap();

        assert!(prismo.public_dir.join("post/post-2/index.html").exists());
        assert!(!prismo.public_dir.join("post/post-3/index.html").exists());
    }
}
