//! Host element lifecycle states.

use serde::{Deserialize, Serialize};

/// Lifecycle state of a host element.
///
/// Transitions: `Unattached -> Idle -> Activating -> Active -> Deactivating
/// -> Idle`, with `Destroyed` terminal from any state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HostState {
    /// Created but not yet attached to a display surface
    Unattached,
    /// Attached with no active plugin
    Idle,
    /// Plugin activation in progress
    Activating,
    /// A plugin is live and owns the surface
    Active,
    /// The current plugin is being torn down
    Deactivating,
    /// Terminal: the host surface is gone
    Destroyed,
}

impl HostState {
    /// Whether the host can accept an activation request in this state.
    pub fn accepts_activation(&self) -> bool {
        matches!(self, HostState::Idle | HostState::Active)
    }

    /// Whether this is the terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, HostState::Destroyed)
    }
}

impl std::fmt::Display for HostState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HostState::Unattached => write!(f, "unattached"),
            HostState::Idle => write!(f, "idle"),
            HostState::Activating => write!(f, "activating"),
            HostState::Active => write!(f, "active"),
            HostState::Deactivating => write!(f, "deactivating"),
            HostState::Destroyed => write!(f, "destroyed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_activation() {
        assert!(HostState::Idle.accepts_activation());
        assert!(HostState::Active.accepts_activation());
        assert!(!HostState::Unattached.accepts_activation());
        assert!(!HostState::Destroyed.accepts_activation());
    }

    #[test]
    fn test_terminal_state() {
        assert!(HostState::Destroyed.is_terminal());
        assert!(!HostState::Idle.is_terminal());
    }

    #[test]
    fn test_display() {
        assert_eq!(HostState::Activating.to_string(), "activating");
        assert_eq!(HostState::Destroyed.to_string(), "destroyed");
    }
}
