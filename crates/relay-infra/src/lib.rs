//! Infrastructure layer for the realtime transcript relay.
//!
//! Contains implementations of the ports defined in `relay-core`: identity
//! provider token verifiers (Supabase, static table, TTL cache) and the
//! `relay.toml` configuration loader.

pub mod auth;
pub mod config;
