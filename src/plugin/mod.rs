//! Plugin contract, descriptors, and registry.
//!
//! The extension surface of the viewer:
//! - Capability contract every renderer implements
//! - Descriptor and factory seam for instantiation
//! - Name-keyed registry for discovery

pub mod contract;
pub mod descriptor;
pub mod registry;

pub use contract::{DebugPlugin, DebugPluginFactory, Plugin};
pub use descriptor::{PluginContext, PluginDescriptor, PluginFactory};
pub use registry::{register_plugin, PluginRegistry, RegisteredPlugin};
