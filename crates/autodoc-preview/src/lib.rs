//! HTML preview for generated documentation.
//!
//! Produces a standalone page with the documentation text and a Mermaid
//! render target. The diagram is drawn client-side by the Mermaid bundle
//! loaded from [`PreviewOptions::mermaid_cdn_url`]; rendering itself makes no
//! network calls.
//!
//! Documentation text from the model is untrusted. It is HTML-escaped unless
//! [`PreviewOptions::escape_html`] is turned off, in which case it is
//! inserted verbatim as the model's own markup. Diagram text is always
//! escaped: Mermaid reads it back from the element's text content.

use std::fmt::Write;

use autodoc_config::PreviewConfig;

/// Heading shown above the documentation.
pub const PREVIEW_HEADING: &str = "Generated Documentation";

/// Title of the preview document.
pub const PREVIEW_TITLE: &str = "Documentation Preview";

/// Id of the element Mermaid renders into.
pub const MERMAID_CONTAINER_ID: &str = "mermaid-container";

/// Rendering options.
#[derive(Debug, Clone)]
pub struct PreviewOptions {
    /// URL of the Mermaid bundle.
    pub mermaid_cdn_url: String,
    /// Escape documentation text before embedding it.
    pub escape_html: bool,
}

impl PreviewOptions {
    /// Options from resolved preview config.
    #[must_use]
    pub fn from_config(config: &PreviewConfig) -> Self {
        Self {
            mermaid_cdn_url: config.mermaid_cdn_url.clone(),
            escape_html: config.escape_html,
        }
    }
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self::from_config(&PreviewConfig::default())
    }
}

/// Render the preview page.
///
/// `diagram` is the body of the extracted fenced block. With no diagram the
/// render target is left empty and Mermaid has nothing to draw.
#[must_use]
pub fn render_preview(documentation: &str, diagram: Option<&str>, options: &PreviewOptions) -> String {
    let mut html = String::with_capacity(documentation.len() + 2048);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"UTF-8\">\n");
    html.push_str(
        "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
    );
    let _ = writeln!(html, "<title>{PREVIEW_TITLE}</title>");
    let _ = writeln!(
        html,
        "<script src=\"{}\"></script>",
        escape_html(&options.mermaid_cdn_url)
    );
    render_style(&mut html);
    html.push_str("<script>\n");
    html.push_str("document.addEventListener('DOMContentLoaded', () => {\n");
    html.push_str("  mermaid.initialize({ startOnLoad: true });\n");
    html.push_str("});\n");
    html.push_str("</script>\n");
    html.push_str("</head>\n<body>\n");

    let _ = writeln!(html, "<h1>{PREVIEW_HEADING}</h1>");

    if options.escape_html {
        html.push_str("<div class=\"documentation plain\">");
        html.push_str(&escape_html(documentation));
    } else {
        html.push_str("<div class=\"documentation\">");
        html.push_str(documentation);
    }
    html.push_str("</div>\n");

    render_diagram(&mut html, diagram);

    html.push_str("</body>\n</html>\n");
    html
}

fn render_style(html: &mut String) {
    html.push_str("<style>\n");
    html.push_str("body {\n");
    html.push_str("  font-family: Arial, sans-serif;\n");
    html.push_str("  margin: 20px;\n");
    html.push_str("  padding: 0;\n");
    html.push_str("}\n");
    html.push_str("pre {\n");
    html.push_str("  background-color: #f4f4f4;\n");
    html.push_str("  padding: 10px;\n");
    html.push_str("  border-radius: 5px;\n");
    html.push_str("}\n");
    html.push_str(".documentation.plain {\n");
    html.push_str("  white-space: pre-wrap;\n");
    html.push_str("}\n");
    let _ = writeln!(html, "#{MERMAID_CONTAINER_ID} {{");
    html.push_str("  margin-top: 20px;\n");
    html.push_str("  background-color: transparent;\n");
    html.push_str("}\n");
    html.push_str("</style>\n");
}

fn render_diagram(html: &mut String, diagram: Option<&str>) {
    match diagram {
        Some(diagram) => {
            let _ = writeln!(
                html,
                "<pre id=\"{MERMAID_CONTAINER_ID}\" class=\"mermaid\">{}</pre>",
                escape_html(diagram)
            );
        }
        None => {
            let _ = writeln!(html, "<div id=\"{MERMAID_CONTAINER_ID}\"></div>");
        }
    }
}

/// Escape markup-significant characters.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}
