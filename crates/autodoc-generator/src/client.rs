//! HTTP client for the text-generation service.

use std::time::Duration;

use autodoc_config::GeneratorConfig;
use tracing::{debug, info};
use ureq::Agent;

use crate::error::GenerationError;
use crate::prompt::PromptTemplate;
use crate::types::{GeneratedDocument, GenerationRequest};

/// Source of generated documentation.
///
/// The command controller depends on this trait rather than on
/// [`GeneratorClient`], so tests can substitute canned responses.
pub trait DocumentationService: Send + Sync {
    /// Generate documentation for `code`.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError`] on transport failure, error status, or a
    /// response without a string `result` field.
    fn request_documentation(&self, code: &str) -> Result<GeneratedDocument, GenerationError>;
}

/// Text-generation API client.
pub struct GeneratorClient {
    agent: Agent,
    url: String,
    api_key: String,
    api_host: String,
    web_access: bool,
    prompt: PromptTemplate,
}

impl GeneratorClient {
    /// Create client from validated config.
    #[must_use]
    pub fn from_config(config: &GeneratorConfig) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(config.timeout_secs)))
            .http_status_as_error(false)
            .build()
            .into();

        let prompt = config
            .prompt_template
            .as_deref()
            .map_or_else(PromptTemplate::default, PromptTemplate::custom);

        Self {
            agent,
            url: config.url.clone(),
            api_key: config.api_key.clone(),
            api_host: config.api_host.clone(),
            web_access: config.web_access,
            prompt,
        }
    }

    /// Build the request body for `code`.
    #[must_use]
    pub fn build_request(&self, code: &str) -> GenerationRequest {
        GenerationRequest::new(self.prompt.render(code), self.web_access)
    }
}

impl DocumentationService for GeneratorClient {
    fn request_documentation(&self, code: &str) -> Result<GeneratedDocument, GenerationError> {
        let request = self.build_request(code);
        let payload = serde_json::to_vec(&request)?;

        info!("Requesting documentation from {}", self.url);
        debug!(
            source_len = code.len(),
            payload_len = payload.len(),
            "Generation request"
        );

        let response = self
            .agent
            .post(&self.url)
            .header("x-rapidapi-key", &self.api_key)
            .header("x-rapidapi-host", &self.api_host)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .send(&payload[..])?;

        let status = response.status().as_u16();
        let mut body_reader = response.into_body();

        if status >= 400 {
            let error_body = body_reader
                .read_to_string()
                .unwrap_or_else(|_| "(unable to read error body)".to_owned());
            return Err(GenerationError::HttpResponse {
                status,
                body: error_body,
            });
        }

        let body = body_reader.read_to_string()?;
        debug!(status, body = %body, "Generation response");

        let document = GeneratedDocument::from_json(&body)?;
        info!("Received {} bytes of documentation", document.result.len());
        Ok(document)
    }
}
