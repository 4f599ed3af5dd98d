//! Core utilities and common types for the viewer host.

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::*;
