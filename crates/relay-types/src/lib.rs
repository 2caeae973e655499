//! Shared domain types for the realtime transcript relay.
//!
//! Identities, session keys, transcript messages, wire events, configuration,
//! and their error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod config;
pub mod connection;
pub mod error;
pub mod event;
pub mod identity;
pub mod transcript;
