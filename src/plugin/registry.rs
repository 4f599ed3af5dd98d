//! Plugin registry for name-keyed plugin discovery.
//!
//! Single source of truth mapping plugin names to descriptors, queryable
//! by any host.

use crate::core::{now, Error, Result, Timestamp};
use crate::plugin::descriptor::PluginDescriptor;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock, RwLock};

/// Registered plugin entry.
#[derive(Clone, Debug)]
pub struct RegisteredPlugin {
    /// The descriptor supplied at registration
    pub descriptor: Arc<PluginDescriptor>,
    /// Registration time
    pub registered_at: Timestamp,
}

struct RegistryInner {
    plugins: HashMap<String, RegisteredPlugin>,
    order: Vec<String>,
}

/// Process-wide mapping from plugin name to descriptor.
///
/// Registration is append-only: once a name is registered it is never
/// removed, and a second registration under the same name is rejected so
/// behavior cannot be swapped out under a live host.
pub struct PluginRegistry {
    inner: RwLock<RegistryInner>,
}

impl PluginRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(RegistryInner {
                plugins: HashMap::new(),
                order: Vec::new(),
            }),
        }
    }

    /// The shared process-wide registry.
    ///
    /// Created on first use and never torn down. Hosts accept an explicit
    /// registry handle, so tests can use isolated instances instead.
    pub fn global() -> Arc<PluginRegistry> {
        static GLOBAL: OnceLock<Arc<PluginRegistry>> = OnceLock::new();
        GLOBAL.get_or_init(|| Arc::new(PluginRegistry::new())).clone()
    }

    /// Register a plugin descriptor.
    ///
    /// Fails with [`Error::DuplicateName`] if the name is already taken;
    /// the first registration always wins.
    pub fn register(&self, descriptor: PluginDescriptor) -> Result<()> {
        let name = descriptor.name.clone();
        let mut inner = self.inner.write().unwrap();

        if inner.plugins.contains_key(&name) {
            return Err(Error::DuplicateName(name));
        }

        tracing::debug!(plugin = %name, "registering plugin");
        inner.order.push(name.clone());
        inner.plugins.insert(
            name,
            RegisteredPlugin {
                descriptor: Arc::new(descriptor),
                registered_at: now(),
            },
        );

        Ok(())
    }

    /// Look up a descriptor by name.
    pub fn lookup(&self, name: &str) -> Option<Arc<PluginDescriptor>> {
        self.inner
            .read()
            .unwrap()
            .plugins
            .get(name)
            .map(|entry| entry.descriptor.clone())
    }

    /// Registered entry (descriptor plus bookkeeping) by name.
    pub fn entry(&self, name: &str) -> Option<RegisteredPlugin> {
        self.inner.read().unwrap().plugins.get(name).cloned()
    }

    /// Names of all registered plugins, in registration order.
    pub fn list_names(&self) -> Vec<String> {
        self.inner.read().unwrap().order.clone()
    }

    /// Name of the preferred default plugin, if any.
    ///
    /// Highest priority wins; ties go to the earliest registration.
    pub fn default_name(&self) -> Option<String> {
        let inner = self.inner.read().unwrap();
        let mut best: Option<(&String, i32)> = None;
        for name in &inner.order {
            if let Some(entry) = inner.plugins.get(name) {
                let priority = entry.descriptor.priority;
                match best {
                    Some((_, current)) if priority <= current => {}
                    _ => best = Some((name, priority)),
                }
            }
        }
        best.map(|(name, _)| name.clone())
    }

    /// Number of registered plugins.
    pub fn len(&self) -> usize {
        self.inner.read().unwrap().plugins.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.read().unwrap().plugins.is_empty()
    }
}

impl Default for PluginRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Register a plugin with the process-wide registry.
///
/// The one call plugin modules are expected to make, typically once as a
/// load-time side effect.
pub async fn register_plugin(descriptor: PluginDescriptor) -> Result<()> {
    PluginRegistry::global().register(descriptor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin::contract::DebugPluginFactory;

    fn descriptor(name: &str) -> PluginDescriptor {
        PluginDescriptor::new(name, Arc::new(DebugPluginFactory))
    }

    #[test]
    fn test_registry_creation() {
        let registry = PluginRegistry::new();
        assert_eq!(registry.len(), 0);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_register_and_lookup() {
        let registry = PluginRegistry::new();
        registry.register(descriptor("bar-chart")).unwrap();

        assert_eq!(registry.len(), 1);
        assert!(registry.lookup("bar-chart").is_some());
        assert!(registry.lookup("line-chart").is_none());
        assert!(registry.entry("bar-chart").is_some());
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let registry = PluginRegistry::new();
        registry
            .register(descriptor("bar-chart").with_description("first"))
            .unwrap();

        let result = registry.register(descriptor("bar-chart").with_description("second"));
        assert!(matches!(result, Err(Error::DuplicateName(name)) if name == "bar-chart"));

        // The first registration wins.
        let kept = registry.lookup("bar-chart").unwrap();
        assert_eq!(kept.description, "first");
        assert_eq!(registry.list_names(), vec!["bar-chart"]);
    }

    #[test]
    fn test_list_names_preserves_registration_order() {
        let registry = PluginRegistry::new();
        registry.register(descriptor("datagrid")).unwrap();
        registry.register(descriptor("bar-chart")).unwrap();
        registry.register(descriptor("heatmap")).unwrap();

        assert_eq!(registry.list_names(), vec!["datagrid", "bar-chart", "heatmap"]);
    }

    #[test]
    fn test_default_name_prefers_priority() {
        let registry = PluginRegistry::new();
        registry.register(descriptor("debug").with_priority(-1)).unwrap();
        registry.register(descriptor("datagrid").with_priority(5)).unwrap();
        registry.register(descriptor("bar-chart").with_priority(5)).unwrap();

        // Highest priority wins; ties go to the earliest registration.
        assert_eq!(registry.default_name(), Some("datagrid".to_string()));
    }

    #[test]
    fn test_default_name_empty_registry() {
        let registry = PluginRegistry::new();
        assert!(registry.default_name().is_none());
    }

    #[test]
    fn test_global_registry_is_shared() {
        let first = PluginRegistry::global();
        let second = PluginRegistry::global();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_register_plugin_entry_point() {
        tokio_test::block_on(async {
            register_plugin(descriptor("registry-entry-probe")).await.unwrap();
            assert!(PluginRegistry::global().lookup("registry-entry-probe").is_some());
        });
    }
}
