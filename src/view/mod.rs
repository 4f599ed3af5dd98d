//! Viewer-level data model.
//!
//! Boundary types the host forwards between callers and plugins:
//! - View configuration (columns, grouping, expressions)
//! - Materialized render payloads
//! - Saved viewer state snapshots

pub mod config;
pub mod data;

pub use config::ViewConfig;
pub use data::{HostSnapshot, RenderData};
