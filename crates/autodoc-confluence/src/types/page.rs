//! Confluence page types.

use serde::{Deserialize, Serialize};

/// Confluence page.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Page {
    /// Page ID.
    pub id: String,
    /// Content type (always "page").
    #[serde(rename = "type")]
    pub content_type: String,
    /// Page title.
    pub title: String,
    /// Version information.
    #[serde(default)]
    pub version: Option<Version>,
    /// Hypermedia links.
    #[serde(rename = "_links", default)]
    pub links: Option<Links>,
}

impl Page {
    /// Web URL of the page.
    ///
    /// Prefers the links returned by the server, falling back to the
    /// `viewpage.action` URL built from `base_url`.
    #[must_use]
    pub fn web_url(&self, base_url: &str) -> String {
        let base_url = base_url.trim_end_matches('/');

        if let Some(links) = &self.links
            && let Some(webui) = &links.webui
        {
            let base = links.base.as_deref().unwrap_or(base_url);
            return format!("{}{}", base.trim_end_matches('/'), webui);
        }

        format!("{base_url}/pages/viewpage.action?pageId={}", self.id)
    }
}

/// Page version.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Version {
    /// Version number.
    pub number: u32,
}

/// Page body content.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Body {
    /// Storage format content.
    pub storage: Storage,
}

/// Storage format representation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Storage {
    /// HTML content in Confluence storage format.
    pub value: String,
    /// Content representation (always "storage").
    pub representation: String,
}

impl Storage {
    /// Wrap storage-format markup.
    #[must_use]
    pub fn new(value: String) -> Self {
        Self {
            value,
            representation: "storage".to_owned(),
        }
    }
}

/// Hypermedia links.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Links {
    /// Web UI link, relative to `base`.
    #[serde(default)]
    pub webui: Option<String>,
    /// Site base URL.
    #[serde(default)]
    pub base: Option<String>,
}

/// Reference to a space by key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpaceRef {
    /// Space key.
    pub key: String,
}

/// Reference to an ancestor page by ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AncestorRef {
    /// Page ID.
    pub id: String,
}

/// Page creation payload for `POST /rest/api/content`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatePage {
    /// Target space.
    pub space: SpaceRef,
    /// Page status ("current" publishes immediately).
    pub status: String,
    /// Page title.
    pub title: String,
    /// Content type.
    #[serde(rename = "type")]
    pub content_type: String,
    /// Parent pages; only the first is used.
    pub ancestors: Vec<AncestorRef>,
    /// Page body.
    pub body: Body,
}
