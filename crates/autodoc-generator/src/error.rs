//! Error types for documentation generation.

/// Error from the text-generation service.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// HTTP request failed (network error, timeout, etc).
    #[error("HTTP request failed")]
    HttpRequest(#[from] ureq::Error),

    /// HTTP response error (server returned error status).
    #[error("HTTP error: {status} - {body}")]
    HttpResponse {
        /// HTTP status code.
        status: u16,
        /// Response body (may contain error details).
        body: String,
    },

    /// Request serialization error.
    #[error("JSON error")]
    Json(#[from] serde_json::Error),

    /// Response body is not an object with a string `result` field.
    #[error("malformed response")]
    MalformedResponse(#[source] serde_json::Error),
}
