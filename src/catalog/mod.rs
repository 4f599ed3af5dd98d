//! Expression-command metadata service.
//!
//! Static, queryable catalog of supported expression-language commands for
//! introspection and autocomplete tooling:
//! - Command descriptors and the built-in table
//! - Lazy, cached, fail-soft catalog service

pub mod commands;
pub mod service;

pub use commands::CommandDescriptor;
pub use service::{expression_commands, BuiltinCommands, CommandCatalog, CommandSource};
