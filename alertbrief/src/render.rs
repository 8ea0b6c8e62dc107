use askama::Template;
use tracing::trace;

use crate::error::{Error, Result};

/// Render `template`, tagging any failure with the template's name.
pub fn render<T: Template>(name: &'static str, template: &T) -> Result<String> {
    let rendered = template
        .render()
        .map_err(|source| Error::Template { name, source })?;
    trace!(template = name, bytes = rendered.len(), "rendered template");
    Ok(rendered)
}
