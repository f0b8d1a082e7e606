//! Confluence API types.

mod page;

pub use page::{AncestorRef, Body, CreatePage, Links, Page, SpaceRef, Storage, Version};
