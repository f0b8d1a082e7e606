//! Page creation requests.
//!
//! A [`PublishRequest`] is built fresh for every publish action, either with
//! text only ([`PublishRequest::text`]) or with an inline diagram image
//! ([`PublishRequest::with_diagram`]).

use std::fmt::Write;
use std::path::Path;

use autodoc_config::ConfluenceConfig;
use base64::Engine;
use base64::prelude::BASE64_STANDARD;
use rand::RngExt;

use crate::error::ConfluenceError;
use crate::types::{AncestorRef, Body, CreatePage, Page, SpaceRef, Storage};

/// Upper bound (exclusive) of the random title suffix.
const TITLE_SUFFIX_RANGE: u32 = 1000;

/// Destination of new pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishTarget {
    /// Space key.
    pub space_key: String,
    /// Parent page ID.
    pub parent_page_id: String,
    /// Base title.
    pub title: String,
    /// Whether to append a random number to the title.
    pub title_suffix: bool,
}

impl PublishTarget {
    /// Target from validated Confluence config.
    #[must_use]
    pub fn from_config(config: &ConfluenceConfig) -> Self {
        Self {
            space_key: config.space_key.clone(),
            parent_page_id: config.parent_page_id.clone(),
            title: config.title.clone(),
            title_suffix: config.title_suffix,
        }
    }

    fn title_with(&self, suffix: Option<u32>) -> String {
        match suffix {
            Some(n) if self.title_suffix => format!("{} {n}", self.title),
            _ => self.title.clone(),
        }
    }

    fn random_title(&self) -> String {
        let suffix = self
            .title_suffix
            .then(|| rand::rng().random::<u32>() % TITLE_SUFFIX_RANGE);
        self.title_with(suffix)
    }
}

/// Diagram image embedded as a data URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramImage {
    mime_type: &'static str,
    base64: String,
}

impl DiagramImage {
    /// Read and encode an image file.
    ///
    /// The MIME type follows the extension; unknown extensions are treated as
    /// SVG.
    ///
    /// # Errors
    ///
    /// Returns [`ConfluenceError::Io`] if the file cannot be read.
    pub fn read(path: &Path) -> Result<Self, ConfluenceError> {
        let data = std::fs::read(path)?;
        Ok(Self::from_bytes(mime_type_for(path), &data))
    }

    /// Encode image bytes.
    #[must_use]
    pub fn from_bytes(mime_type: &'static str, data: &[u8]) -> Self {
        Self {
            mime_type,
            base64: BASE64_STANDARD.encode(data),
        }
    }

    /// `data:` URI for the image.
    #[must_use]
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.base64)
    }
}

fn mime_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        _ => "image/svg+xml",
    }
}

/// Page creation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishRequest {
    /// Space key.
    pub space_key: String,
    /// Parent page ID.
    pub parent_page_id: String,
    /// Final page title.
    pub title: String,
    /// Storage-format body.
    pub body: String,
}

impl PublishRequest {
    /// Text-only page. The title gets a random suffix if the target asks for one.
    #[must_use]
    pub fn text(target: &PublishTarget, content: &str) -> Self {
        Self::build(target, target.random_title(), text_body(content))
    }

    /// Page with the diagram image inlined after the content.
    ///
    /// The title is used as configured, without a random suffix.
    #[must_use]
    pub fn with_diagram(target: &PublishTarget, content: &str, image: &DiagramImage) -> Self {
        let mut body = text_body(content);
        body.push_str("<p>Diagram:</p>\n");
        let _ = writeln!(body, "<img src=\"{}\" />", image.data_uri());
        Self::build(target, target.title.clone(), body)
    }

    fn build(target: &PublishTarget, title: String, body: String) -> Self {
        Self {
            space_key: target.space_key.clone(),
            parent_page_id: target.parent_page_id.clone(),
            title,
            body,
        }
    }

    /// JSON payload for `POST /rest/api/content`.
    #[must_use]
    pub fn to_payload(&self) -> CreatePage {
        CreatePage {
            space: SpaceRef {
                key: self.space_key.clone(),
            },
            status: "current".to_owned(),
            title: self.title.clone(),
            content_type: "page".to_owned(),
            ancestors: vec![AncestorRef {
                id: self.parent_page_id.clone(),
            }],
            body: Body {
                storage: Storage::new(self.body.clone()),
            },
        }
    }
}

fn text_body(content: &str) -> String {
    format!("\n<p>{content}</p>\n")
}

/// Destination for generated documentation.
///
/// The command controller depends on this trait rather than on
/// [`ConfluenceClient`](crate::ConfluenceClient), so tests can record
/// requests instead of sending them.
pub trait PagePublisher: Send + Sync {
    /// Create the page.
    ///
    /// # Errors
    ///
    /// Returns [`ConfluenceError`] on transport failure or error status.
    fn publish(&self, request: &PublishRequest) -> Result<Page, ConfluenceError>;

    /// Web URL of a created page.
    fn page_url(&self, page: &Page) -> String;
}
