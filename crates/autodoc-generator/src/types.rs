//! Request and response types for the text-generation service.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::GenerationError;

/// Chat message role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
}

/// Single chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Message author.
    pub role: Role,
    /// Message text.
    pub content: String,
}

/// Request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationRequest {
    /// Conversation, always a single user message.
    pub messages: Vec<Message>,
    /// Whether the service may browse the web.
    pub web_access: bool,
}

impl GenerationRequest {
    /// Build a request with one user message.
    #[must_use]
    pub fn new(prompt: String, web_access: bool) -> Self {
        Self {
            messages: vec![Message {
                role: Role::User,
                content: prompt,
            }],
            web_access,
        }
    }
}

/// Generated documentation as returned by the service.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GeneratedDocument {
    /// Documentation text, including the fenced diagram block if any.
    pub result: String,
    /// Remaining response fields, kept for logging.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl GeneratedDocument {
    /// Create a document with no extra fields.
    #[must_use]
    pub fn new(result: impl Into<String>) -> Self {
        Self {
            result: result.into(),
            extra: Map::new(),
        }
    }

    /// Parse a response body.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::MalformedResponse`] if the body is not a JSON
    /// object with a string `result` field.
    pub fn from_json(body: &str) -> Result<Self, GenerationError> {
        serde_json::from_str(body).map_err(GenerationError::MalformedResponse)
    }
}
