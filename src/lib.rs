//! prismo-rs: a static blog generator backed by a headless CMS
//!
//! This crate pre-renders blog post pages from a Prismic-style content
//! API: it enumerates the published post identifiers, fetches each raw
//! document, normalizes it into a post view model, and renders one
//! static HTML page per post with an embedded Tera theme.

pub mod backend;
pub mod commands;
pub mod config;
pub mod content;
pub mod generator;
pub mod helpers;
pub mod server;
pub mod templates;

use anyhow::Result;
use std::path::Path;

/// The main Prismo application
#[derive(Clone)]
pub struct Prismo {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Public (output) directory
    pub public_dir: std::path::PathBuf,
}

impl Prismo {
    /// Create a new Prismo instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let public_dir = base_dir.join(&config.public_dir);

        Ok(Self {
            config,
            base_dir,
            public_dir,
        })
    }

    /// Build a content client from the backend configuration
    pub fn client(&self) -> backend::prismic::PrismicClient {
        backend::prismic::PrismicClient::new(
            &self.config.backend.api_url,
            self.config.backend.access_token.as_deref(),
        )
    }

    /// Generate the static site
    pub async fn generate(&self) -> Result<()> {
        commands::generate::run(self).await
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}
