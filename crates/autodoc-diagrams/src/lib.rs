//! Diagram block extraction for autodoc.
//!
//! The text-generation service is asked to return its architecture diagram
//! inside a fenced code block tagged with the diagram language. This crate
//! pulls that block back out of free-form model output:
//!
//! - [`DiagramLanguage`]: the diagram language and its fence label
//! - [`extract_diagram`]: first-match extraction of the fenced block body
//!
//! # Example
//!
//! ```
//! use autodoc_diagrams::extract_diagram;
//!
//! let text = "Hello ```mermaid\nsequenceDiagram\nA->>B: hi\n``` World";
//! assert_eq!(
//!     extract_diagram(text).as_deref(),
//!     Some("\nsequenceDiagram\nA->>B: hi\n")
//! );
//! assert_eq!(extract_diagram("no fences here"), None);
//! ```

mod extract;
mod language;

pub use extract::{extract_diagram, extract_diagram_from_value};
pub use language::DiagramLanguage;
