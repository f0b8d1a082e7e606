//! Fenced diagram block extraction.
//!
//! Model output is untrusted free text. Extraction never fails: anything that
//! goes wrong is logged and reported as "no diagram".

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use tracing::{debug, warn};

use crate::DiagramLanguage;

/// First ```` ```mermaid ```` fence up to the next closing fence, lazily.
static MERMAID_BLOCK_RE: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| block_regex(DiagramLanguage::Mermaid));

fn block_regex(language: DiagramLanguage) -> Result<Regex, regex::Error> {
    Regex::new(&format!(
        r"(?s)```{}(.*?)```",
        regex::escape(language.fence_label())
    ))
}

/// Extract the body of the first Mermaid fenced block in `text`.
///
/// The captured text is returned unmodified, including the newline that
/// follows the fence label. Later blocks are ignored. An empty block counts
/// as no diagram.
#[must_use]
pub fn extract_diagram(text: &str) -> Option<String> {
    let re = match &*MERMAID_BLOCK_RE {
        Ok(re) => re,
        Err(err) => {
            warn!(error = %err, "Diagram pattern unavailable");
            return None;
        }
    };

    let body = re
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|body| !body.is_empty());

    match body {
        Some(body) => {
            debug!(len = body.len(), "Extracted diagram block");
            Some(body.to_owned())
        }
        None => {
            debug!("No diagram block found");
            None
        }
    }
}

/// Extract a diagram from a structured response.
///
/// String values are matched as-is. Anything else is serialized to JSON text
/// first, so escape sequences inside it (such as `\n`) stay escaped in the
/// returned block.
#[must_use]
pub fn extract_diagram_from_value(value: &Value) -> Option<String> {
    if let Value::String(text) = value {
        return extract_diagram(text);
    }

    match serde_json::to_string(value) {
        Ok(text) => extract_diagram(&text),
        Err(err) => {
            warn!(error = %err, "Failed to serialize response for diagram extraction");
            None
        }
    }
}
