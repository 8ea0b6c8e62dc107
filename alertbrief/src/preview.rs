//! Self-contained HTML preview of a markdown report.
//!
//! The page embeds the report in a JavaScript template literal and renders
//! it client-side with `marked` and `github-markdown-css`. The only
//! transformation applied to the report is [`escape_backticks`]; in
//! particular a literal `</script>` inside the report is not escaped.

use std::fs;
use std::path::Path;

use askama::Template;
use tracing::{info, instrument};

use crate::error::{Error, Result};
use crate::render::render;

#[derive(Template)]
#[template(
    source = r#"
<!doctype html>
<html>
<head>
  <meta charset="utf-8"/>
  <link rel="stylesheet" type="text/css" href="https://cdnjs.cloudflare.com/ajax/libs/github-markdown-css/5.1.0/github-markdown.min.css">
</head>
<body>
  <div class="markdown-body"></div>
  <script src="https://cdn.jsdelivr.net/npm/marked/marked.min.js"></script>
  <script>
    document.getElementsByClassName("markdown-body")[0].innerHTML = marked.parse(`{{ content|safe }}`)
  </script>
</body>
</html>
"#,
    ext = "html"
)]
struct PreviewPage {
    content: String,
}

/// Escape every backtick so `content` cannot close the template literal it
/// is embedded in.
pub fn escape_backticks(content: &str) -> String {
    content.replace('`', "\\`")
}

pub fn render_preview(content: &str) -> Result<String> {
    render(
        "preview",
        &PreviewPage {
            content: escape_backticks(content),
        },
    )
}

/// Render `content` into the preview page and write it to `path`.
///
/// The page is rendered before the file is created, so a rendering
/// failure leaves no file behind.
#[instrument(skip(content), fields(path = %path.display(), content_bytes = content.len()))]
pub fn emit(path: &Path, content: &str) -> Result<()> {
    let html = render_preview(content)?;
    fs::write(path, &html).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(bytes = html.len(), "wrote preview");
    Ok(())
}
