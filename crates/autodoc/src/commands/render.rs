//! `autodoc render` command implementation.
//!
//! Renders a previously saved service response, or plain markdown, into the
//! same preview page `autodoc run` produces. No network access.

use std::path::PathBuf;

use autodoc_command::{MSG_NO_DIAGRAM, PreviewPanel};
use autodoc_config::{CliSettings, Config};
use autodoc_diagrams::{extract_diagram, extract_diagram_from_value};
use autodoc_generator::GeneratedDocument;
use autodoc_preview::{PREVIEW_HEADING, PreviewOptions, render_preview};
use clap::Args;
use serde_json::Value;
use tracing::debug;

use crate::error::CliError;
use crate::host::write_preview;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Saved response (JSON with a `result` field) or markdown file.
    file: PathBuf,

    /// Output HTML file (default: `<output-dir>/<file stem>.html`).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Directory for preview files (overrides config).
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover autodoc.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration is invalid or a file cannot be read
    /// or written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            output_dir: self.output_dir.clone(),
            ..Default::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let text = std::fs::read_to_string(&self.file)?;
        let (documentation, diagram) = parse_saved(text);
        if diagram.is_none() {
            output.warning(MSG_NO_DIAGRAM);
        }

        let options = PreviewOptions::from_config(&config.preview_resolved);
        let html = render_preview(&documentation, diagram.as_deref(), &options);

        let path = if let Some(path) = self.output {
            std::fs::write(&path, html)?;
            path
        } else {
            let panel = PreviewPanel {
                title: PREVIEW_HEADING.to_owned(),
                source_name: self.file.display().to_string(),
                html,
            };
            write_preview(&config.preview_resolved.output_dir, &panel)?
        };

        output.success(&format!("Preview written to {}", path.display()));
        Ok(())
    }
}

/// Documentation text and diagram from a saved file.
///
/// A full response contributes its `result` text. Other JSON is searched in
/// its serialized form and rendered as-is. Anything else is treated as
/// markdown.
fn parse_saved(text: String) -> (String, Option<String>) {
    match GeneratedDocument::from_json(&text) {
        Ok(document) => {
            let diagram = extract_diagram(&document.result);
            (document.result, diagram)
        }
        Err(err) => {
            debug!(error = %err, "Not a saved response");
            let diagram = match serde_json::from_str::<Value>(&text) {
                Ok(value) => extract_diagram_from_value(&value),
                Err(_) => extract_diagram(&text),
            };
            (text, diagram)
        }
    }
}
