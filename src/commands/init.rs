//! Initialize a new site

use anyhow::Result;
use std::fs;
use std::path::Path;

/// Default site configuration written by `init`
const DEFAULT_CONFIG: &str = r#"# Prismo Configuration

# Site
title: Prismo
subtitle: ''
description: ''
author: John Doe
language: pt-br

# URL
url: http://example.com
root: /

# Directory
public_dir: public

# Content backend
backend:
  api_url: https://your-repo.cdn.prismic.io/api/v2
  # access_token: ''
  document_type: posts
  page_size: 2
"#;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    fs::create_dir_all(target_dir)?;

    let config_path = target_dir.join("_config.yml");
    if config_path.exists() {
        anyhow::bail!("{:?} already exists", config_path);
    }
    fs::write(&config_path, DEFAULT_CONFIG)?;

    Ok(())
}
