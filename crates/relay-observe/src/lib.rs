//! Observability for the realtime relay: subscriber setup and the span field
//! names shared by every crate.

pub mod fields;
pub mod tracing_setup;
