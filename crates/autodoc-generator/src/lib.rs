//! Documentation generation for autodoc.
//!
//! Sends source text to a hosted chat-completion endpoint and returns the
//! generated documentation:
//!
//! - [`PromptTemplate`] embeds the source in the instruction text
//! - [`GenerationRequest`] is the JSON request body
//! - [`GeneratedDocument`] is the parsed response
//! - [`DocumentationService`] is the seam the command controller calls;
//!   [`GeneratorClient`] implements it over HTTP
//!
//! # Example
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use autodoc_config::Config;
//! use autodoc_generator::{DocumentationService, GeneratorClient};
//!
//! let config = Config::load(None, None)?;
//! let client = GeneratorClient::from_config(config.require_generator()?);
//! let document = client.request_documentation("fn main() {}")?;
//! println!("{}", document.result);
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod prompt;
#[cfg(test)]
mod test_server;
mod types;

pub use client::{DocumentationService, GeneratorClient};
pub use error::GenerationError;
pub use prompt::PromptTemplate;
pub use types::{GeneratedDocument, GenerationRequest, Message, Role};
