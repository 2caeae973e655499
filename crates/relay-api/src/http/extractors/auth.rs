//! Handshake authentication extractor.
//!
//! Extracts the bearer token from:
//! - `?token=<token>` query parameter (browsers cannot set headers on a
//!   WebSocket upgrade)
//! - `Authorization: Bearer <token>` header
//!
//! and runs it through the [`ConnectionGate`](relay_core::auth::gate::ConnectionGate).
//! A rejection answers the upgrade request with 401, so the WebSocket is
//! never established.

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use serde::Deserialize;

use relay_core::relay::connection::ConnectionContext;

use crate::http::error::AppError;
use crate::state::AppState;

/// An admitted connection, ready to be attached to its socket.
pub struct Authenticated(pub ConnectionContext);

#[derive(Debug, Deserialize)]
struct TokenQuery {
    token: Option<String>,
}

impl FromRequestParts<AppState> for Authenticated {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_token(parts);

        match state.gate.admit(token.as_deref()).await {
            Ok(ctx) => Ok(Authenticated(ctx)),
            Err(err) => {
                tracing::warn!(error = %err, "Rejected connection");
                Err(err.into())
            }
        }
    }
}

/// Pull the handshake token out of the request, query parameter first.
fn extract_token(parts: &Parts) -> Option<String> {
    if let Ok(Query(TokenQuery { token: Some(token) })) = Query::<TokenQuery>::try_from_uri(&parts.uri) {
        if !token.is_empty() {
            return Some(token);
        }
    }

    let auth = parts.headers.get(axum::http::header::AUTHORIZATION)?;
    let auth_str = auth.to_str().ok()?;
    // The auth scheme name is case-insensitive.
    let (scheme, token) = auth_str.split_once(' ')?;
    scheme
        .eq_ignore_ascii_case("bearer")
        .then(|| token.trim().to_string())
}
