//! View configuration handed to plugins.

use crate::core::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Declarative description of the view a plugin should draw.
///
/// The host forwards this alongside the render payload; plugins interpret
/// the parts they understand and ignore the rest.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewConfig {
    /// Columns to display, in order
    pub columns: Vec<String>,
    /// Row grouping columns
    pub group_by: Vec<String>,
    /// Column splitting columns
    pub split_by: Vec<String>,
    /// Named expression columns (name -> expression source)
    pub expressions: HashMap<String, String>,
}

impl ViewConfig {
    /// Create an empty view configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a display column.
    pub fn with_column(mut self, column: &str) -> Self {
        self.columns.push(column.to_string());
        self
    }

    /// Add a row-grouping column.
    pub fn with_group_by(mut self, column: &str) -> Self {
        self.group_by.push(column.to_string());
        self
    }

    /// Add a column-splitting column.
    pub fn with_split_by(mut self, column: &str) -> Self {
        self.split_by.push(column.to_string());
        self
    }

    /// Add a named expression column.
    pub fn with_expression(mut self, name: &str, expression: &str) -> Self {
        self.expressions
            .insert(name.to_string(), expression.to_string());
        self
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
