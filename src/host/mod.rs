//! Host element lifecycle and plugin mediation.
//!
//! The viewer surface:
//! - Lifecycle state machine
//! - Serialized activation with supersession
//! - Delegation of viewer operations to the active plugin

pub mod element;
pub mod state;

pub use element::{ActivationOutcome, HostElement};
pub use state::HostState;
