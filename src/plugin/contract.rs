//! Plugin contract definition.
//!
//! Defines the capability set every hosted plugin must implement.

use crate::core::{Error, Result};
use crate::plugin::descriptor::{PluginContext, PluginDescriptor, PluginFactory};
use crate::view::{RenderData, ViewConfig};
use async_trait::async_trait;
use futures::future::BoxFuture;
use std::sync::Arc;

/// Capability set every hosted plugin must implement.
///
/// A host element owns at most one active plugin at a time and drives it
/// exclusively through this trait. The host enforces state validity:
/// plugins only see these calls in the order the host's lifecycle allows,
/// and `delete` is called exactly once per instance.
#[async_trait]
pub trait Plugin: Send + Sync {
    /// Bind the plugin to a host context. Called once per activation.
    async fn activate(&mut self, ctx: &PluginContext) -> Result<()>;

    /// Draw the supplied data under the given view configuration.
    async fn render(&mut self, data: &RenderData, config: &ViewConfig) -> Result<()>;

    /// React to a change of the host surface dimensions.
    async fn resize(&mut self, width: u32, height: u32) -> Result<()>;

    /// Discard any drawn output while staying activated.
    async fn clear(&mut self) -> Result<()>;

    /// Capture plugin-defined state for a later [`restore`](Plugin::restore).
    async fn save(&self) -> Result<serde_json::Value>;

    /// Re-apply state captured by [`save`](Plugin::save).
    async fn restore(&mut self, state: &serde_json::Value) -> Result<()>;

    /// Release all resources held by the plugin.
    async fn delete(&mut self) -> Result<()>;
}

/// A built-in plugin that renders data as a plain-text table.
///
/// Ships with the crate as the fallback renderer and doubles as a reference
/// implementation of the contract.
pub struct DebugPlugin {
    activated: bool,
    width: u32,
    height: u32,
    output: String,
    render_count: u64,
}

impl DebugPlugin {
    /// Create a new debug plugin.
    pub fn new() -> Self {
        Self {
            activated: false,
            width: 0,
            height: 0,
            output: String::new(),
            render_count: 0,
        }
    }

    /// Registry descriptor for the built-in debug plugin.
    pub fn descriptor() -> PluginDescriptor {
        PluginDescriptor::new("debug", Arc::new(DebugPluginFactory))
            .with_description("Renders data as a plain-text table")
            .with_category("debug")
            .with_priority(-1)
    }

    /// The rendered text output.
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Number of render calls since creation.
    pub fn render_count(&self) -> u64 {
        self.render_count
    }
}

impl Default for DebugPlugin {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Plugin for DebugPlugin {
    async fn activate(&mut self, ctx: &PluginContext) -> Result<()> {
        self.activated = true;
        self.width = ctx.width();
        self.height = ctx.height();
        Ok(())
    }

    async fn render(&mut self, data: &RenderData, config: &ViewConfig) -> Result<()> {
        if !self.activated {
            return Err(Error::Plugin("render before activation".to_string()));
        }
        let columns = if config.columns.is_empty() {
            data.columns.clone()
        } else {
            config.columns.clone()
        };

        let mut out = columns.join("\t");
        out.push('\n');
        for row in &data.rows {
            let line: Vec<String> = columns
                .iter()
                .map(|c| match row.get(c) {
                    Some(value) => value.to_string(),
                    None => "null".to_string(),
                })
                .collect();
            out.push_str(&line.join("\t"));
            out.push('\n');
        }

        self.output = out;
        self.render_count += 1;
        Ok(())
    }

    async fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        self.width = width;
        self.height = height;
        Ok(())
    }

    async fn clear(&mut self) -> Result<()> {
        self.output.clear();
        Ok(())
    }

    async fn save(&self) -> Result<serde_json::Value> {
        Ok(serde_json::json!({
            "width": self.width,
            "height": self.height,
            "render_count": self.render_count,
        }))
    }

    async fn restore(&mut self, state: &serde_json::Value) -> Result<()> {
        if let Some(width) = state.get("width").and_then(|v| v.as_u64()) {
            self.width = width as u32;
        }
        if let Some(height) = state.get("height").and_then(|v| v.as_u64()) {
            self.height = height as u32;
        }
        if let Some(count) = state.get("render_count").and_then(|v| v.as_u64()) {
            self.render_count = count;
        }
        Ok(())
    }

    async fn delete(&mut self) -> Result<()> {
        self.activated = false;
        self.output.clear();
        Ok(())
    }
}

/// Factory for [`DebugPlugin`].
pub struct DebugPluginFactory;

impl PluginFactory for DebugPluginFactory {
    fn create<'a>(&'a self, _ctx: &'a PluginContext) -> BoxFuture<'a, Result<Box<dyn Plugin>>> {
        Box::pin(async { Ok(Box::new(DebugPlugin::new()) as Box<dyn Plugin>) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_data() -> RenderData {
        RenderData::new(&["name", "price"])
            .with_row(json!({"name": "widget", "price": 10}))
            .with_row(json!({"name": "gadget", "price": 25}))
    }

    #[tokio::test]
    async fn test_debug_plugin_lifecycle() {
        let ctx = PluginContext::new(640, 480);
        let mut plugin = DebugPlugin::new();

        plugin.activate(&ctx).await.unwrap();
        plugin.render(&sample_data(), &ViewConfig::default()).await.unwrap();

        assert!(plugin.output().contains("widget"));
        assert_eq!(plugin.render_count(), 1);

        plugin.clear().await.unwrap();
        assert!(plugin.output().is_empty());

        plugin.delete().await.unwrap();
    }

    #[tokio::test]
    async fn test_debug_plugin_respects_column_selection() {
        let ctx = PluginContext::new(640, 480);
        let mut plugin = DebugPlugin::new();
        plugin.activate(&ctx).await.unwrap();

        let config = ViewConfig::new().with_column("price");
        plugin.render(&sample_data(), &config).await.unwrap();

        assert!(plugin.output().contains("10"));
        assert!(!plugin.output().contains("widget"));
    }

    #[tokio::test]
    async fn test_debug_plugin_save_restore() {
        let ctx = PluginContext::new(640, 480);
        let mut plugin = DebugPlugin::new();
        plugin.activate(&ctx).await.unwrap();
        plugin.render(&sample_data(), &ViewConfig::default()).await.unwrap();

        let state = plugin.save().await.unwrap();

        let mut fresh = DebugPlugin::new();
        fresh.restore(&state).await.unwrap();
        assert_eq!(fresh.render_count(), 1);
    }

    #[tokio::test]
    async fn test_debug_plugin_factory() {
        let ctx = PluginContext::new(0, 0);
        let factory = DebugPluginFactory;
        let mut plugin = factory.create(&ctx).await.unwrap();

        plugin.activate(&ctx).await.unwrap();
        plugin.delete().await.unwrap();
    }
}
