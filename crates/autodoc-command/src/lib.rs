//! Documentation command for autodoc.
//!
//! Wires the generator, diagram extraction, preview rendering and Confluence
//! publishing into one user-triggered command:
//!
//! - [`Host`]: what the command needs from the editor or terminal
//! - [`CommandController`]: one invocation of the preview or publish flow
//! - [`CommandRegistry`]: id-to-handler map with drop-to-unregister guards
//! - [`Extension`]: registers [`COMMAND_ID`] for the lifetime of the value
//!
//! # Example
//!
//! ```ignore
//! use autodoc_command::{COMMAND_ID, CommandController, CommandRegistry, Extension};
//!
//! let registry = CommandRegistry::new();
//! let extension = Extension::activate(&registry, CommandController::preview(service, options))?;
//! let outcome = registry.execute(COMMAND_ID, &host)?;
//! extension.deactivate();
//! ```

mod controller;
mod extension;
mod host;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
mod registry;

pub use controller::{
    CommandController, Failure, MSG_CONFIRM_PUBLISH, MSG_GENERATING, MSG_GENERATION_FAILED,
    MSG_NO_ACTIVE_DOCUMENT, MSG_NO_DIAGRAM, MSG_PREVIEW_FAILED, MSG_PUBLISH_FAILED, MSG_UPLOADED,
    MSG_UPLOADING, Outcome, PublishMode, Publishing, Stage,
};
pub use extension::{COMMAND_ID, Extension};
pub use host::{CHOICE_NO, CHOICE_YES, Host, NoticeLevel, PreviewPanel, SourceText};
pub use registry::{CommandHandler, CommandRegistry, Registration, RegistryError};
