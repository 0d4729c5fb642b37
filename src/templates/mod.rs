//! Built-in post theme templates using Tera
//!
//! The theme is embedded directly in the binary, so a generated site
//! needs no template files on disk.

use anyhow::Result;
use tera::{Context, Tera};

/// Template renderer with the embedded theme loaded
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all theme templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // Rendered section bodies are already HTML; context values are
        // escaped where needed before insertion
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("theme/layout.html")),
            ("post.html", include_str!("theme/post.html")),
            ("loading.html", include_str!("theme/loading.html")),
        ])?;

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_templates_load() {
        let renderer = TemplateRenderer::new().unwrap();
        let mut context = Context::new();
        context.insert("lang", "pt-br");
        context.insert("root", "/");
        context.insert("site_title", "spacetraveling");

        let html = renderer.render("loading.html", &context).unwrap();
        assert!(html.contains("Carregando..."));
        assert!(html.contains(r#"<html lang="pt-br">"#));
    }
}
