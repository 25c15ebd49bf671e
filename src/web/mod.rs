//! Landing page rendering. Templates are read from disk on every
//! request so edits show up without a restart.

use std::path::Path;

use anyhow::{Error, Result};
use handlebars::Handlebars;
use serde::Serialize;

pub const INDEX_TEMPLATE: &str = "index.html";

#[derive(Serialize)]
pub struct IndexContext {
    pub model: String,
    pub model_loaded: bool,
}

pub async fn render_index(templates_path: &str, context: &IndexContext) -> Result<String, Error> {
    let path = Path::new(templates_path).join(INDEX_TEMPLATE);
    let source = tokio::fs::read_to_string(&path).await?;

    let mut registry = Handlebars::new();
    registry.set_strict_mode(true);
    let html = registry.render_template(&source, context)?;

    Ok(html)
}
