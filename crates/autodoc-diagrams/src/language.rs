//! Diagram languages the generator is asked to produce.

use std::fmt;

/// Supported diagram languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum DiagramLanguage {
    #[default]
    Mermaid,
}

impl DiagramLanguage {
    /// Label written after the opening fence.
    #[must_use]
    pub fn fence_label(self) -> &'static str {
        match self {
            Self::Mermaid => "mermaid",
        }
    }

    /// Human-readable name used in prompts and notices.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Mermaid => "Mermaid",
        }
    }
}

impl fmt::Display for DiagramLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
