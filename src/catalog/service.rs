//! Lazy, cached command metadata service.

use crate::catalog::commands::{builtin_commands, CommandDescriptor};
use crate::core::{Error, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::OnceLock;
use tokio::sync::Mutex;

/// Source of command descriptors for a catalog.
#[async_trait]
pub trait CommandSource: Send + Sync {
    /// Load the full descriptor list.
    async fn load(&self) -> Result<Vec<CommandDescriptor>>;
}

/// The built-in expression-command table.
pub struct BuiltinCommands;

#[async_trait]
impl CommandSource for BuiltinCommands {
    async fn load(&self) -> Result<Vec<CommandDescriptor>> {
        Ok(builtin_commands())
    }
}

enum CatalogState {
    Unloaded,
    Ready(Vec<CommandDescriptor>),
    Failed,
}

/// Cached catalog of supported expression commands.
///
/// Loads lazily on the first query and returns the identical sequence on
/// every later call. A failed load is reported once; later calls yield an
/// empty sequence instead of retrying.
pub struct CommandCatalog {
    source: Box<dyn CommandSource>,
    state: Mutex<CatalogState>,
}

impl CommandCatalog {
    /// Create a catalog over the given source.
    pub fn new(source: Box<dyn CommandSource>) -> Self {
        Self {
            source,
            state: Mutex::new(CatalogState::Unloaded),
        }
    }

    /// Create a catalog over the built-in command table.
    pub fn builtin() -> Self {
        Self::new(Box::new(BuiltinCommands))
    }

    /// The process-wide catalog over the built-in table.
    ///
    /// Created on first use and cached for the process lifetime.
    pub fn global() -> &'static CommandCatalog {
        static GLOBAL: OnceLock<CommandCatalog> = OnceLock::new();
        GLOBAL.get_or_init(CommandCatalog::builtin)
    }

    /// All supported command descriptors.
    pub async fn commands(&self) -> Result<Vec<CommandDescriptor>> {
        let mut state = self.state.lock().await;
        match &*state {
            CatalogState::Ready(commands) => Ok(commands.clone()),
            CatalogState::Failed => Ok(Vec::new()),
            CatalogState::Unloaded => match self.source.load().await {
                Ok(commands) => {
                    *state = CatalogState::Ready(commands.clone());
                    Ok(commands)
                }
                Err(e) => {
                    tracing::warn!(error = %e, "command catalog failed to load");
                    *state = CatalogState::Failed;
                    Err(Error::CatalogUnavailable(e.to_string()))
                }
            },
        }
    }
}

/// Get metadata for the supported expression commands.
///
/// Read-only introspection surface over the process-wide catalog; each
/// descriptor is flattened to a string-to-string record.
pub async fn expression_commands() -> Result<Vec<HashMap<String, String>>> {
    let commands = CommandCatalog::global().commands().await?;
    Ok(commands.iter().map(CommandDescriptor::to_record).collect())
}
