//! Per-connection relay logic: connection context, the speech message
//! router, and disconnect cleanup.

pub mod connection;
pub mod lifecycle;
pub mod router;
