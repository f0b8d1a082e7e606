//! CLI error types.

use autodoc_command::{RegistryError, Stage};
use autodoc_config::ConfigError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Registry(#[from] RegistryError),

    /// The command stopped early and has already shown its own notice.
    #[error("command ended in stage {0}")]
    Incomplete(Stage),
}

impl CliError {
    /// Whether the user has already been told about this failure.
    pub(crate) fn is_notified(&self) -> bool {
        matches!(self, Self::Incomplete(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_notified() {
        assert!(CliError::Incomplete(Stage::Failed).is_notified());
        assert!(CliError::Incomplete(Stage::PublishFailed).is_notified());
        assert!(!CliError::Registry(RegistryError::NotRegistered("x".to_owned())).is_notified());
        assert!(!CliError::Io(std::io::Error::other("x")).is_notified());
    }
}
