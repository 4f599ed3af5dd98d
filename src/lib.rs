//! # vizhost - Embeddable Data-Viewer Host
//!
//! A plugin registration and capability-extension layer for an embeddable
//! visualization surface:
//! - **Plugin contract**: the capability set every renderer implements
//! - **Plugin registry**: process-wide, name-keyed plugin discovery
//! - **Host element**: owns at most one active plugin and mediates its lifecycle
//! - **Command catalog**: static metadata for expression-language commands
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use vizhost::{register_plugin, DebugPlugin, HostElement};
//!
//! #[tokio::main]
//! async fn main() {
//!     // Plugin modules register themselves once, at load time.
//!     register_plugin(DebugPlugin::descriptor()).await.unwrap();
//!
//!     // A host surface activates plugins by name.
//!     let host = HostElement::new();
//!     host.attach().await.unwrap();
//!     host.activate("debug").await.unwrap();
//! }
//! ```

pub mod catalog;
pub mod core;
pub mod host;
pub mod plugin;
pub mod view;

pub use crate::catalog::{expression_commands, CommandCatalog, CommandDescriptor, CommandSource};
pub use crate::core::error::{Error, Result};
pub use crate::host::{ActivationOutcome, HostElement, HostState};
pub use crate::plugin::{
    register_plugin, DebugPlugin, Plugin, PluginContext, PluginDescriptor, PluginFactory,
    PluginRegistry,
};
pub use crate::view::{HostSnapshot, RenderData, ViewConfig};
