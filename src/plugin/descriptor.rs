//! Plugin descriptors, factories, and activation context.

use crate::core::Result;
use crate::plugin::contract::Plugin;
use futures::future::BoxFuture;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Context passed to plugin factories and activation.
///
/// Owned by the host; plugins receive a view of the surface they are being
/// bound to along with host-supplied configuration.
#[derive(Clone, Debug)]
pub struct PluginContext {
    /// Identifier of the owning host surface
    host_id: String,
    /// Current surface width in pixels
    width: u32,
    /// Current surface height in pixels
    height: u32,
    /// Host-supplied configuration
    config: HashMap<String, serde_json::Value>,
}

impl PluginContext {
    /// Create a context for a host surface of the given dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            host_id: Uuid::new_v4().to_string(),
            width,
            height,
            config: HashMap::new(),
        }
    }

    /// Identifier of the owning host surface.
    pub fn host_id(&self) -> &str {
        &self.host_id
    }

    /// Current surface width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Current surface height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    pub(crate) fn set_dimensions(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    /// Get a typed config value.
    pub fn get_config<T: for<'de> serde::Deserialize<'de>>(&self, key: &str) -> Option<T> {
        self.config
            .get(key)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    /// Set a config value.
    pub fn set_config(&mut self, key: &str, value: serde_json::Value) {
        self.config.insert(key.to_string(), value);
    }
}

/// Produces plugin instances for a registered descriptor.
///
/// Instantiation is an asynchronous suspension point: a factory may load
/// assets or negotiate with a rendering backend before the instance exists.
pub trait PluginFactory: Send + Sync {
    /// Instantiate a fresh plugin bound to the supplied context.
    fn create<'a>(&'a self, ctx: &'a PluginContext) -> BoxFuture<'a, Result<Box<dyn Plugin>>>;
}

/// Registry entry describing one plugin kind.
#[derive(Clone)]
pub struct PluginDescriptor {
    /// Globally unique plugin name, the registration key
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// Display category for discovery UIs
    pub category: String,
    /// Default-plugin selection weight, higher wins
    pub priority: i32,
    /// Minimum number of columns the plugin needs to render
    pub min_columns: usize,
    /// Factory producing instances of this plugin
    pub factory: Arc<dyn PluginFactory>,
}

impl PluginDescriptor {
    /// Create a descriptor for a named plugin.
    pub fn new(name: &str, factory: Arc<dyn PluginFactory>) -> Self {
        Self {
            name: name.to_string(),
            description: String::new(),
            category: String::new(),
            priority: 0,
            min_columns: 1,
            factory,
        }
    }

    /// Set description.
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// Set display category.
    pub fn with_category(mut self, category: &str) -> Self {
        self.category = category.to_string();
        self
    }

    /// Set default-plugin selection priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Set the minimum column count the plugin can render.
    pub fn with_min_columns(mut self, min_columns: usize) -> Self {
        self.min_columns = min_columns;
        self
    }

    /// Instantiate a plugin from this descriptor.
    pub async fn instantiate(&self, ctx: &PluginContext) -> Result<Box<dyn Plugin>> {
        self.factory.create(ctx).await
    }
}

impl fmt::Debug for PluginDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginDescriptor")
            .field("name", &self.name)
            .field("category", &self.category)
            .field("priority", &self.priority)
            .field("min_columns", &self.min_columns)
            .finish()
    }
}
