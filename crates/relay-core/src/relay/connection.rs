//! Per-connection context.
//!
//! Owned by the task serving one WebSocket connection, so it is never
//! shared or mutated concurrently. Carries the identity resolved at
//! handshake time and enforces the connection state machine.

use std::collections::BTreeSet;

use relay_types::connection::ConnectionState;
use relay_types::error::RelayError;
use relay_types::identity::{ConnectionId, Identity};

#[derive(Debug)]
pub struct ConnectionContext {
    id: ConnectionId,
    identity: Option<Identity>,
    state: ConnectionState,
    /// Session ids this connection has written transcript entries for.
    touched_sessions: BTreeSet<String>,
}

impl ConnectionContext {
    /// A fresh context in `Connecting`.
    pub fn new() -> Self {
        Self {
            id: ConnectionId::new(),
            identity: None,
            state: ConnectionState::Connecting,
            touched_sessions: BTreeSet::new(),
        }
    }

    /// A fresh context that has already passed the gate.
    pub fn authenticated(identity: Identity) -> Self {
        Self {
            identity: Some(identity),
            state: ConnectionState::Authenticated,
            ..Self::new()
        }
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    /// Identity that owns this connection's transcripts.
    ///
    /// Falls back to a connection-scoped identity if none was ever attached.
    pub fn owner(&self) -> Identity {
        self.identity
            .clone()
            .unwrap_or_else(|| self.id.fallback_identity())
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == ConnectionState::Active
    }

    pub fn is_closed(&self) -> bool {
        self.state.is_terminal()
    }

    /// `Authenticated -> Active`, once the connection is attached to its event loop.
    pub fn activate(&mut self) -> Result<(), RelayError> {
        self.transition(ConnectionState::Active)
    }

    /// Move to `Closed`. Returns `false` if the context was already closed.
    pub fn close(&mut self) -> bool {
        if self.is_closed() {
            return false;
        }
        self.state = ConnectionState::Closed;
        true
    }

    pub fn record_session(&mut self, session_id: &str) {
        if !self.touched_sessions.contains(session_id) {
            self.touched_sessions.insert(session_id.to_string());
        }
    }

    pub fn touched_sessions(&self) -> impl Iterator<Item = &str> {
        self.touched_sessions.iter().map(String::as_str)
    }

    fn transition(&mut self, next: ConnectionState) -> Result<(), RelayError> {
        if !self.state.can_transition_to(next) {
            return Err(RelayError::InvalidTransition {
                from: self.state,
                to: next,
            });
        }
        self.state = next;
        Ok(())
    }
}

impl Default for ConnectionContext {
    fn default() -> Self {
        Self::new()
    }
}
