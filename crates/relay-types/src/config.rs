//! Relay configuration types.
//!
//! `RelayConfig` mirrors `relay.toml`. Every field has a default so an empty
//! or missing file yields a runnable configuration.

use serde::{Deserialize, Serialize};

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Which transcripts are purged when a connection closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PurgeScope {
    /// Every session key owned by the disconnecting identity, including keys
    /// written by other live connections of the same user.
    #[default]
    Identity,
    /// Only the session keys this connection wrote to.
    Connection,
}

impl fmt::Display for PurgeScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PurgeScope::Identity => write!(f, "identity"),
            PurgeScope::Connection => write!(f, "connection"),
        }
    }
}

impl FromStr for PurgeScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "identity" => Ok(PurgeScope::Identity),
            "connection" => Ok(PurgeScope::Connection),
            other => Err(format!("invalid purge scope: '{other}'")),
        }
    }
}

/// Token verification backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthProviderKind {
    /// Supabase Auth `GET /auth/v1/user`.
    #[default]
    Supabase,
    /// Fixed token table from `auth.static_tokens` (local development).
    Static,
}

/// `[auth]` section of `relay.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub provider: AuthProviderKind,

    /// How long a verified token stays cached. 0 disables the cache.
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// Token -> user id table used by the static provider.
    #[serde(default)]
    pub static_tokens: HashMap<String, String>,
}

fn default_cache_ttl_secs() -> u64 {
    300
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            provider: AuthProviderKind::default(),
            cache_ttl_secs: default_cache_ttl_secs(),
            static_tokens: HashMap::new(),
        }
    }
}

/// Top-level relay configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Upper bound on a single token verification call.
    #[serde(default = "default_verify_timeout_ms")]
    pub verify_timeout_ms: u64,

    #[serde(default)]
    pub purge_scope: PurgeScope,

    /// Per-session transcript cap. 0 means unbounded.
    #[serde(default)]
    pub max_messages_per_session: usize,

    #[serde(default)]
    pub auth: AuthConfig,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3002
}

fn default_verify_timeout_ms() -> u64 {
    5_000
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            verify_timeout_ms: default_verify_timeout_ms(),
            purge_scope: PurgeScope::default(),
            max_messages_per_session: 0,
            auth: AuthConfig::default(),
        }
    }
}
