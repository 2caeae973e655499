//! Application error type mapping to HTTP status codes and envelope format.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use relay_types::error::AuthError;

/// Message clients see for every handshake rejection.
pub const AUTHENTICATION_ERROR: &str = "Authentication error";

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Handshake rejected by the connection gate.
    Unauthorized(String),
}

impl From<AuthError> for AppError {
    fn from(_: AuthError) -> Self {
        // The cause is logged at the rejection site; clients get one message.
        AppError::Unauthorized(AUTHENTICATION_ERROR.to_string())
    }
}

impl AppError {
    fn parts(&self) -> (StatusCode, &'static str, &str) {
        match self {
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

        let body = json!({
            "data": null,
            "meta": {
                "timestamp": chrono::Utc::now().to_rfc3339(),
            },
            "errors": [{
                "code": code,
                "message": message,
            }]
        });

        (
            status,
            [(axum::http::header::CONTENT_TYPE, "application/json")],
            body.to_string(),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_auth_error_maps_to_the_same_rejection() {
        for err in [
            AuthError::MissingToken,
            AuthError::InvalidToken,
            AuthError::NoIdentity,
            AuthError::Timeout(5000),
            AuthError::Provider("down".to_string()),
        ] {
            let app_err: AppError = err.into();
            let (status, code, message) = app_err.parts();
            assert_eq!(status, StatusCode::UNAUTHORIZED);
            assert_eq!(code, "UNAUTHORIZED");
            assert_eq!(message, AUTHENTICATION_ERROR);
        }
    }

    #[test]
    fn unauthorized_response_status() {
        let response = AppError::Unauthorized(AUTHENTICATION_ERROR.to_string()).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
