//! Host environment seam.
//!
//! Everything the command needs from the editor (or terminal) it runs in.

use std::fmt;
use std::io;

/// Affirmative answer to the publish confirmation.
pub const CHOICE_YES: &str = "Yes";

/// Negative answer to the publish confirmation.
pub const CHOICE_NO: &str = "No";

/// Snapshot of the active document taken when the command starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceText {
    /// Display name, usually the file name.
    pub name: String,
    /// Full document text.
    pub text: String,
}

impl SourceText {
    /// Create a snapshot.
    #[must_use]
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

/// Severity of a user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

impl fmt::Display for NoticeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        })
    }
}

/// Rendered preview ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewPanel {
    /// Panel title.
    pub title: String,
    /// Name of the source document the preview was generated from.
    pub source_name: String,
    /// Complete HTML document.
    pub html: String,
}

/// Editor or terminal the command runs in.
pub trait Host {
    /// The document to generate documentation for, if any.
    fn active_document(&self) -> Option<SourceText>;

    /// Show a notice to the user.
    fn notify(&self, level: NoticeLevel, message: &str);

    /// Ask the user to pick one of `choices`.
    ///
    /// Returns `None` if the prompt was dismissed.
    fn confirm(&self, message: &str, choices: &[&str]) -> Option<String>;

    /// Display the preview beside the editor.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the preview cannot be shown.
    fn show_preview(&self, panel: &PreviewPanel) -> io::Result<()>;
}
