//! List site content

use anyhow::Result;
use walkdir::WalkDir;

use crate::backend::{ContentSource, QueryOptions};
use crate::helpers::date;
use crate::Prismo;

/// List site content by type
pub async fn run(prismo: &Prismo, content_type: &str) -> Result<()> {
    match content_type {
        "post" | "posts" => {
            let client = prismo.client();
            list_posts(prismo, &client).await?;
        }
        "route" | "routes" => {
            list_routes(prismo)?;
        }
        _ => {
            anyhow::bail!("Unknown type: {}. Available: post, route", content_type);
        }
    }

    Ok(())
}

/// List posts known to the content backend
pub async fn list_posts(prismo: &Prismo, source: &dyn ContentSource) -> Result<()> {
    let options = QueryOptions {
        page_size: prismo.config.backend.page_size,
        fetch: Vec::new(),
    };
    let documents = source
        .query(&prismo.config.backend.document_type, &options)
        .await?;

    println!("Posts ({}):", documents.len());
    for doc in documents {
        println!(
            "  {} - {} [{}]",
            date::format_publication_date(doc.first_publication_date.as_ref()),
            doc.data.title,
            doc.uid
        );
    }

    Ok(())
}

/// List generated routes under the public directory
fn list_routes(prismo: &Prismo) -> Result<()> {
    if !prismo.public_dir.exists() {
        println!("Routes (0):");
        return Ok(());
    }

    let mut routes = Vec::new();
    for entry in WalkDir::new(&prismo.public_dir)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if path.is_file() && path.file_name().is_some_and(|n| n == "index.html") {
            let relative = path
                .parent()
                .and_then(|p| p.strip_prefix(&prismo.public_dir).ok())
                .map(|p| p.to_string_lossy().to_string())
                .unwrap_or_default();
            routes.push(format!("/{}/", relative.trim_matches('/')));
        }
    }

    routes.sort();
    println!("Routes ({}):", routes.len());
    for route in routes {
        println!("  {}", route);
    }

    Ok(())
}
