//! Render payloads and saved viewer state.

use crate::core::Result;
use serde::{Deserialize, Serialize};

/// Materialized tabular payload handed to a plugin for rendering.
///
/// Produced by the external data engine; the host only carries it across
/// the plugin boundary.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderData {
    /// Column names, in display order
    pub columns: Vec<String>,
    /// Row records, one JSON object per row
    pub rows: Vec<serde_json::Value>,
}

impl RenderData {
    /// Create a payload with the given columns and no rows.
    pub fn new(columns: &[&str]) -> Self {
        Self {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row record.
    pub fn with_row(mut self, row: serde_json::Value) -> Self {
        self.rows.push(row);
        self
    }

    /// Number of rows in the payload.
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns in the payload.
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Whether the payload carries no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Saved viewer state: the active plugin plus its opaque configuration.
///
/// Restoring a snapshot onto a host activates the named plugin if it is not
/// already active, then hands the payload back to it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HostSnapshot {
    /// Name of the plugin that produced the state
    pub plugin: String,
    /// Plugin-defined state payload
    pub config: serde_json::Value,
}

impl HostSnapshot {
    /// Create a snapshot for a plugin.
    pub fn new(plugin: &str, config: serde_json::Value) -> Self {
        Self {
            plugin: plugin.to_string(),
            config,
        }
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserialize from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_data() {
        let data = RenderData::new(&["price", "quantity"])
            .with_row(json!({"price": 10.5, "quantity": 3}))
            .with_row(json!({"price": 2.0, "quantity": 7}));

        assert_eq!(data.num_columns(), 2);
        assert_eq!(data.num_rows(), 2);
        assert!(!data.is_empty());
    }

    #[test]
    fn test_render_data_empty() {
        let data = RenderData::new(&["price"]);
        assert!(data.is_empty());
        assert_eq!(data.num_rows(), 0);
    }

    #[test]
    fn test_snapshot_roundtrip() {
        let snapshot = HostSnapshot::new("bar-chart", json!({"axis": "y"}));

        let json = snapshot.to_json().unwrap();
        let parsed = HostSnapshot::from_json(&json).unwrap();

        assert_eq!(parsed, snapshot);
        assert_eq!(parsed.plugin, "bar-chart");
    }
}
