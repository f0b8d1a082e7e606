//! Terminal host for the documentation command.
//!
//! The "active document" is the file given on the command line, notices go
//! to stderr, confirmation reads a line from the terminal, and the preview is
//! written to an HTML file in the preview output directory.

use std::io;
use std::path::{Path, PathBuf};

use autodoc_command::{Host, NoticeLevel, PreviewPanel, SourceText};
use tracing::{info, warn};

use crate::output::Output;

/// File name stem used when the source name has none.
const DEFAULT_PREVIEW_STEM: &str = "preview";

/// Host backed by the terminal and the filesystem.
pub(crate) struct TerminalHost {
    output: Output,
    document: Option<SourceText>,
    output_dir: PathBuf,
}

impl TerminalHost {
    pub(crate) fn new(document: Option<SourceText>, output_dir: PathBuf) -> Self {
        Self {
            output: Output::new(),
            document,
            output_dir,
        }
    }
}

impl Host for TerminalHost {
    fn active_document(&self) -> Option<SourceText> {
        self.document.clone()
    }

    fn notify(&self, level: NoticeLevel, message: &str) {
        self.output.notice(level, message);
    }

    fn confirm(&self, message: &str, choices: &[&str]) -> Option<String> {
        self.output.info(message);
        self.output.prompt(&format!("[{}] ", choices.join("/")));
        match self.output.read_line() {
            Ok(line) => match_choice(&line, choices),
            Err(err) => {
                warn!(error = %err, "Failed to read confirmation");
                None
            }
        }
    }

    fn show_preview(&self, panel: &PreviewPanel) -> io::Result<()> {
        let path = write_preview(&self.output_dir, panel)?;
        self.output
            .success(&format!("Preview written to {}", path.display()));
        Ok(())
    }
}

/// The choice the user typed, if it names one exactly.
fn match_choice(input: &str, choices: &[&str]) -> Option<String> {
    let input = input.trim();
    choices
        .iter()
        .find(|choice| **choice == input)
        .map(|choice| (*choice).to_owned())
}

/// Write the preview document to `<output_dir>/<source stem>.html`.
pub(crate) fn write_preview(output_dir: &Path, panel: &PreviewPanel) -> io::Result<PathBuf> {
    std::fs::create_dir_all(output_dir)?;
    let path = output_dir.join(format!("{}.html", preview_stem(&panel.source_name)));
    std::fs::write(&path, &panel.html)?;
    info!(path = %path.display(), "Wrote preview");
    Ok(path)
}

fn preview_stem(source_name: &str) -> &str {
    Path::new(source_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_PREVIEW_STEM)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use autodoc_command::mock::MockDocumentationService;
    use autodoc_command::{CommandController, Outcome};
    use autodoc_preview::PreviewOptions;
    use pretty_assertions::assert_eq;

    use super::*;

    fn panel(source_name: &str) -> PreviewPanel {
        PreviewPanel {
            title: "Generated Documentation".to_owned(),
            source_name: source_name.to_owned(),
            html: "<html></html>".to_owned(),
        }
    }

    #[test]
    fn test_match_choice_exact() {
        let choices = ["Yes", "No"];
        assert_eq!(match_choice("Yes\n", &choices), Some("Yes".to_owned()));
        assert_eq!(match_choice("  No ", &choices), Some("No".to_owned()));
    }

    #[test]
    fn test_match_choice_rejects_other_input() {
        let choices = ["Yes", "No"];
        assert_eq!(match_choice("yes", &choices), None);
        assert_eq!(match_choice("y", &choices), None);
        assert_eq!(match_choice("", &choices), None);
    }

    #[test]
    fn test_preview_stem() {
        assert_eq!(preview_stem("Sort.java"), "Sort");
        assert_eq!(preview_stem("src/lib.rs"), "lib");
        assert_eq!(preview_stem(""), "preview");
    }

    #[test]
    fn test_write_preview_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let output_dir = dir.path().join(".autodoc/preview");

        let path = write_preview(&output_dir, &panel("Sort.java")).unwrap();

        assert_eq!(path, output_dir.join("Sort.html"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<html></html>");
    }

    #[test]
    fn test_show_preview_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let host = TerminalHost::new(None, dir.path().to_path_buf());

        host.show_preview(&panel("main.rs")).unwrap();

        assert!(dir.path().join("main.html").exists());
        assert!(host.active_document().is_none());
    }

    #[test]
    fn test_preview_flow_writes_preview_file() {
        let dir = tempfile::tempdir().unwrap();
        let host = TerminalHost::new(
            Some(SourceText::new("Sort.java", "class Sort {}")),
            dir.path().to_path_buf(),
        );
        let controller = CommandController::preview(
            Arc::new(MockDocumentationService::responding(
                "Docs\n```mermaid\ngraph TD\n```",
            )),
            PreviewOptions::default(),
        );

        let outcome = controller.run(&host);

        assert!(matches!(outcome, Outcome::Previewed { diagram_found: true }));
        let html = std::fs::read_to_string(dir.path().join("Sort.html")).unwrap();
        assert!(html.contains("class=\"mermaid\">\ngraph TD\n</pre>"));
    }
}
