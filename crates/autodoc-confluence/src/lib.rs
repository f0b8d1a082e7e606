//! Confluence publishing for autodoc.
//!
//! Creates a page holding generated documentation under a fixed parent page.
//!
//! # Example
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use autodoc_confluence::{ConfluenceClient, PagePublisher, PublishRequest, PublishTarget};
//!
//! let client = ConfluenceClient::new(
//!     "https://example.atlassian.net/wiki",
//!     "me@example.com",
//!     "api-token",
//! );
//! let target = PublishTarget {
//!     space_key: "SD".to_owned(),
//!     parent_page_id: "131371".to_owned(),
//!     title: "Generated Documentation".to_owned(),
//!     title_suffix: true,
//! };
//! let page = client.publish(&PublishRequest::text(&target, "Hello"))?;
//! println!("{}", client.page_url(&page));
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod publish;
#[cfg(test)]
mod test_server;
mod types;

pub use client::ConfluenceClient;
pub use error::ConfluenceError;
pub use publish::{DiagramImage, PagePublisher, PublishRequest, PublishTarget};
pub use types::{AncestorRef, Body, CreatePage, Links, Page, SpaceRef, Storage, Version};
