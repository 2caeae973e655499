use thiserror::Error;

use crate::connection::ConnectionState;

/// Errors raised while admitting a connection.
///
/// Every variant is surfaced to the client as the same authentication
/// failure; the distinction only matters for logs.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("missing bearer token")]
    MissingToken,

    #[error("invalid or expired token")]
    InvalidToken,

    #[error("token verified but no identity was returned")]
    NoIdentity,

    #[error("token verification timed out after {0} ms")]
    Timeout(u64),

    #[error("identity provider error: {0}")]
    Provider(String),
}

/// Errors from transcript store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("transcript store backend error: {0}")]
    Backend(String),
}

/// Errors from reply generation.
#[derive(Debug, Error)]
pub enum ReplyError {
    #[error("cannot generate a reply without a user message")]
    EmptyHistory,

    #[error("reply backend error: {0}")]
    Backend(String),
}

/// Top-level relay error.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Reply(#[from] ReplyError),

    #[error("invalid connection transition: {from} -> {to}")]
    InvalidTransition {
        from: ConnectionState,
        to: ConnectionState,
    },
}
