//! Extension lifecycle.
//!
//! Activation registers the single command; deactivation (or dropping the
//! [`Extension`]) releases it.

use std::sync::Arc;

use tracing::info;

use crate::controller::CommandController;
use crate::host::Host;
use crate::registry::{CommandRegistry, Registration, RegistryError};

/// Id of the documentation command.
pub const COMMAND_ID: &str = "autodoc.autodoc";

/// Active extension holding its command registration.
pub struct Extension<'a> {
    registration: Registration<'a>,
}

impl<'a> Extension<'a> {
    /// Register the documentation command backed by `controller`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::AlreadyRegistered`] if the extension is
    /// already active on `registry`.
    pub fn activate(
        registry: &'a CommandRegistry,
        controller: CommandController,
    ) -> Result<Self, RegistryError> {
        let flow = controller.flow();
        let controller = Arc::new(controller);
        let registration = registry.register(
            COMMAND_ID,
            Arc::new(move |host: &dyn Host| controller.run(host)),
        )?;
        info!(command = COMMAND_ID, %flow, "Extension activated");
        Ok(Self { registration })
    }

    /// Id of the registered command.
    #[must_use]
    pub fn command_id(&self) -> &str {
        self.registration.id()
    }

    /// Unregister the command.
    pub fn deactivate(self) {
        info!(command = COMMAND_ID, "Extension deactivated");
        drop(self.registration);
    }
}
