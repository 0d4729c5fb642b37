//! Preview server with blocking on-demand generation
//!
//! Serves the generated pages from the public directory. A request for
//! a post that was not pre-rendered is not a 404: the page is generated
//! on demand before the response is produced and persisted as a newly
//! static path. While a slug's generation is in flight, concurrent
//! requests for it receive the loading placeholder.

use anyhow::Result;
use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    response::{Html, IntoResponse, Response},
    Router,
};
use percent_encoding::percent_decode_str;
use std::collections::HashSet;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tower_http::services::ServeDir;

use crate::backend::prismic::PrismicClient;
use crate::commands;
use crate::generator;
use crate::templates::TemplateRenderer;
use crate::Prismo;

/// Server state
struct ServerState {
    prismo: Prismo,
    client: PrismicClient,
    renderer: TemplateRenderer,
    fallback: bool,
    in_flight: Mutex<HashSet<String>>,
}

/// Start the preview server
pub async fn start(prismo: &Prismo, ip: &str, port: u16, fallback: bool) -> Result<()> {
    let state = Arc::new(ServerState {
        prismo: prismo.clone(),
        client: prismo.client(),
        renderer: TemplateRenderer::new()?,
        fallback,
        in_flight: Mutex::new(HashSet::new()),
    });

    let app = Router::new().fallback(fallback_handler).with_state(state);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    if fallback {
        println!("On-demand generation enabled for unlisted posts.");
    }
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Serve pre-rendered files; unknown post slugs fall through to
/// on-demand generation
async fn fallback_handler(
    State(state): State<Arc<ServerState>>,
    request: Request<Body>,
) -> Response {
    let path = percent_decode_str(request.uri().path())
        .decode_utf8_lossy()
        .into_owned();

    let mut service = ServeDir::new(&state.prismo.public_dir).append_index_html_on_directories(true);
    match service.try_call(request).await {
        Ok(response) if response.status() != StatusCode::NOT_FOUND => response.into_response(),
        _ => miss(state, &path).await,
    }
}

/// Handle a path with no pre-rendered file
async fn miss(state: Arc<ServerState>, path: &str) -> Response {
    if !state.fallback {
        return not_found();
    }

    let Some(slug) = post_slug(path) else {
        return not_found();
    };

    {
        let mut in_flight = state.in_flight.lock().expect("in-flight set poisoned");
        if !in_flight.insert(slug.to_string()) {
            // Another request is already generating this slug
            return loading_page(&state);
        }
    }

    let result = generate_on_demand(&state, slug).await;

    state
        .in_flight
        .lock()
        .expect("in-flight set poisoned")
        .remove(slug);

    match result {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("On-demand generation failed for {}: {:#}", slug, e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Generation failed").into_response()
        }
    }
}

/// Assemble, render, and persist one post, blocking the response
async fn generate_on_demand(state: &ServerState, slug: &str) -> Result<String> {
    tracing::info!("Generating on demand: {}", slug);

    let document_type = &state.prismo.config.backend.document_type;
    let props = generator::assemble(&state.client, document_type, slug).await?;
    let html = generator::render(&state.renderer, &state.prismo.config, &props)?;
    commands::generate::write_post_page(&state.prismo, slug, &html)?;

    Ok(html)
}

/// Extract the slug from a `/post/<slug>/` request path
fn post_slug(path: &str) -> Option<&str> {
    let rest = path.strip_prefix("/post/")?;
    let rest = rest.strip_suffix("index.html").unwrap_or(rest);
    let slug = rest.trim_matches('/');

    (!slug.is_empty() && !slug.contains('/')).then_some(slug)
}

fn loading_page(state: &ServerState) -> Response {
    match generator::render_loading(&state.renderer, &state.prismo.config) {
        Ok(html) => Html(html).into_response(),
        Err(_) => Html("<h1>Carregando...</h1>".to_string()).into_response(),
    }
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "Not found").into_response()
}
