//! Styled messages on stderr.

use autodoc_command::NoticeLevel;
use console::{Style, Term};

/// Writes user-facing messages; logs go through `tracing` instead.
pub(crate) struct Output {
    term: Term,
    green: Style,
    yellow: Style,
    red: Style,
    cyan_bold: Style,
}

impl Output {
    /// Create a new output formatter writing to stderr.
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            green: Style::new().green(),
            yellow: Style::new().yellow(),
            red: Style::new().red(),
            cyan_bold: Style::new().cyan().bold(),
        }
    }

    /// Print an info message.
    pub(crate) fn info(&self, msg: &str) {
        let _ = self.term.write_line(msg);
    }

    /// Print a success message (green).
    pub(crate) fn success(&self, msg: &str) {
        let _ = self.term.write_line(&self.green.apply_to(msg).to_string());
    }

    /// Print a warning message (yellow).
    pub(crate) fn warning(&self, msg: &str) {
        let _ = self.term.write_line(&self.yellow.apply_to(msg).to_string());
    }

    /// Print an error message (red).
    pub(crate) fn error(&self, msg: &str) {
        let _ = self.term.write_line(&self.red.apply_to(msg).to_string());
    }

    /// Print a prompt (cyan bold) without a trailing newline.
    pub(crate) fn prompt(&self, msg: &str) {
        let _ = self.term.write_str(&self.cyan_bold.apply_to(msg).to_string());
        let _ = self.term.flush();
    }

    /// Print a command notice styled by severity.
    pub(crate) fn notice(&self, level: NoticeLevel, msg: &str) {
        match level {
            NoticeLevel::Info => self.info(msg),
            NoticeLevel::Warning => self.warning(msg),
            NoticeLevel::Error => self.error(msg),
        }
    }

    /// Read one line of user input.
    pub(crate) fn read_line(&self) -> std::io::Result<String> {
        self.term.read_line()
    }
}
