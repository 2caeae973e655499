//! HTTP layer for the relay.
//!
//! Axum server exposing the authenticated `/ws` upgrade endpoint and a
//! `/health` probe.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
