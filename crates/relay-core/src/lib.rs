//! Domain logic and port definitions for the realtime transcript relay.
//!
//! This crate defines the "ports" (token verification, transcript storage,
//! reply generation) that the infrastructure layer implements, plus the
//! per-connection gate, router, and lifecycle logic built on them. It
//! depends only on `relay-types` -- never on `relay-infra` or any network
//! crate.

pub mod auth;
pub mod relay;
pub mod reply;
pub mod transcript;
