//! Command registry.
//!
//! Maps command ids to handlers. Each id has at most one live registration,
//! and a registration is released when its guard is dropped.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::debug;

use crate::controller::Outcome;
use crate::host::Host;

/// Handler invoked when a command is executed.
pub type CommandHandler = Arc<dyn Fn(&dyn Host) -> Outcome + Send + Sync>;

/// Error returned by registry operations.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("Command already registered: {0}")]
    AlreadyRegistered(String),

    #[error("Command not registered: {0}")]
    NotRegistered(String),
}

/// Registered command handlers, keyed by id.
#[derive(Default)]
pub struct CommandRegistry {
    handlers: Mutex<HashMap<String, CommandHandler>>,
}

impl CommandRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` under `id`.
    ///
    /// The handler stays registered until the returned guard is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::AlreadyRegistered`] if `id` is taken.
    pub fn register(
        &self,
        id: &str,
        handler: CommandHandler,
    ) -> Result<Registration<'_>, RegistryError> {
        let mut handlers = self.lock();
        if handlers.contains_key(id) {
            return Err(RegistryError::AlreadyRegistered(id.to_owned()));
        }
        handlers.insert(id.to_owned(), handler);
        debug!(command = id, "Registered command");

        Ok(Registration {
            registry: self,
            id: id.to_owned(),
        })
    }

    /// Run the handler registered under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotRegistered`] if nothing is registered
    /// under `id`.
    pub fn execute(&self, id: &str, host: &dyn Host) -> Result<Outcome, RegistryError> {
        // Released before the call so the handler may use the registry.
        let handler = self
            .lock()
            .get(id)
            .cloned()
            .ok_or_else(|| RegistryError::NotRegistered(id.to_owned()))?;
        debug!(command = id, "Executing command");
        Ok(handler(host))
    }

    /// Whether a handler is registered under `id`.
    #[must_use]
    pub fn is_registered(&self, id: &str) -> bool {
        self.lock().contains_key(id)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, CommandHandler>> {
        self.handlers.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Live registration. Dropping it unregisters the command.
pub struct Registration<'a> {
    registry: &'a CommandRegistry,
    id: String,
}

impl Registration<'_> {
    /// Registered command id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl Drop for Registration<'_> {
    fn drop(&mut self) {
        self.registry.lock().remove(&self.id);
        debug!(command = %self.id, "Unregistered command");
    }
}
