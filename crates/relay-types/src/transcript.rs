//! Transcript types: session keys, message roles, and transcript messages.
//!
//! A transcript is the ordered list of user/assistant messages exchanged
//! during one live session. Transcripts are partitioned by [`SessionKey`],
//! the composite of the authenticated identity and the client-supplied
//! session id.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

use crate::identity::Identity;

/// Session id used when the client omits one.
pub const DEFAULT_SESSION_ID: &str = "default";

/// Resolve a client-supplied session id, falling back to [`DEFAULT_SESSION_ID`].
///
/// An empty string counts as omitted.
pub fn resolve_session_id(session_id: Option<&str>) -> &str {
    match session_id {
        Some(id) if !id.is_empty() => id,
        _ => DEFAULT_SESSION_ID,
    }
}

/// Composite key partitioning transcript storage.
///
/// Used only as a map key; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionKey {
    pub identity: Identity,
    pub session_id: String,
}

impl SessionKey {
    pub fn new(identity: Identity, session_id: impl Into<String>) -> Self {
        Self {
            identity,
            session_id: session_id.into(),
        }
    }

    /// Build a key from an optional client session id.
    pub fn resolve(identity: Identity, session_id: Option<&str>) -> Self {
        Self::new(identity, resolve_session_id(session_id))
    }

    /// Whether this key belongs to the given identity.
    pub fn is_owned_by(&self, identity: &Identity) -> bool {
        &self.identity == identity
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.identity, self.session_id)
    }
}

/// Speaker of a transcript message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
        }
    }
}

impl FromStr for MessageRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(MessageRole::User),
            "assistant" => Ok(MessageRole::Assistant),
            other => Err(format!("invalid message role: '{other}'")),
        }
    }
}

/// A single message in a session transcript.
///
/// Never mutated after creation. Serialized with camelCase field names,
/// which is the shape clients receive inside `avatar:response` events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptMessage {
    /// `<role>_<uuid v7>`, unique even for messages created in the same millisecond.
    pub id: String,
    pub role: MessageRole,
    pub content: String,
    /// Creation time in epoch milliseconds.
    pub timestamp: i64,
    pub session_id: String,
}

impl TranscriptMessage {
    pub fn new(role: MessageRole, content: impl Into<String>, session_id: impl Into<String>) -> Self {
        Self {
            id: format!("{role}_{}", Uuid::now_v7()),
            role,
            content: content.into(),
            timestamp: Utc::now().timestamp_millis(),
            session_id: session_id.into(),
        }
    }

    pub fn user(content: impl Into<String>, session_id: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content, session_id)
    }

    pub fn assistant(content: impl Into<String>, session_id: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content, session_id)
    }
}
