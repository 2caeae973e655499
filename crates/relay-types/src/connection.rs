//! Per-connection lifecycle state.
//!
//! `Connecting -> Authenticated -> Active -> Closed`, with a direct
//! `Connecting -> Closed` edge for rejected handshakes.

use serde::{Deserialize, Serialize};

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionState {
    Connecting,
    Authenticated,
    Active,
    Closed,
}

impl ConnectionState {
    /// Whether moving from `self` to `next` is a legal transition.
    pub fn can_transition_to(self, next: ConnectionState) -> bool {
        use ConnectionState::*;
        matches!(
            (self, next),
            (Connecting, Authenticated)
                | (Connecting, Closed)
                | (Authenticated, Active)
                | (Authenticated, Closed)
                | (Active, Closed)
        )
    }

    pub fn is_terminal(self) -> bool {
        self == ConnectionState::Closed
    }
}

impl Default for ConnectionState {
    fn default() -> Self {
        ConnectionState::Connecting
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionState::Connecting => write!(f, "connecting"),
            ConnectionState::Authenticated => write!(f, "authenticated"),
            ConnectionState::Active => write!(f, "active"),
            ConnectionState::Closed => write!(f, "closed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path_transitions() {
        assert!(ConnectionState::Connecting.can_transition_to(ConnectionState::Authenticated));
        assert!(ConnectionState::Authenticated.can_transition_to(ConnectionState::Active));
        assert!(ConnectionState::Active.can_transition_to(ConnectionState::Closed));
    }

    #[test]
    fn test_rejected_handshake_goes_straight_to_closed() {
        assert!(ConnectionState::Connecting.can_transition_to(ConnectionState::Closed));
    }

    #[test]
    fn test_closed_is_terminal() {
        for next in [
            ConnectionState::Connecting,
            ConnectionState::Authenticated,
            ConnectionState::Active,
            ConnectionState::Closed,
        ] {
            assert!(!ConnectionState::Closed.can_transition_to(next));
        }
        assert!(ConnectionState::Closed.is_terminal());
    }

    #[test]
    fn test_cannot_skip_authentication() {
        assert!(!ConnectionState::Connecting.can_transition_to(ConnectionState::Active));
        assert!(!ConnectionState::Active.can_transition_to(ConnectionState::Authenticated));
    }

    #[test]
    fn test_default_is_connecting() {
        assert_eq!(ConnectionState::default(), ConnectionState::Connecting);
    }
}
