//! Health probe (no auth required).

use axum::extract::State;
use axum::Json;

use relay_core::transcript::store::TranscriptStore;
use relay_types::error::StoreError;

use crate::state::AppState;

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    health_body(state.store.session_count().await)
}

/// Report `degraded` with no session count when the store cannot be read.
fn health_body(sessions: Result<usize, StoreError>) -> Json<serde_json::Value> {
    let (status, sessions) = match sessions {
        Ok(count) => ("ok", Some(count)),
        Err(err) => {
            tracing::warn!(error = %err, "Health check could not read the transcript store");
            ("degraded", None)
        }
    };
    Json(serde_json::json!({
        "status": status,
        "service": "realtime",
        "version": env!("CARGO_PKG_VERSION"),
        "active_sessions": sessions,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_support::test_state;

    #[tokio::test]
    async fn reports_ok_and_session_count() {
        let Json(body) = health_check(State(test_state())).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "realtime");
        assert_eq!(body["active_sessions"], 0);
    }

    #[test]
    fn store_failure_reports_degraded() {
        let Json(body) = health_body(Err(StoreError::Backend("unreachable".to_string())));
        assert_eq!(body["status"], "degraded");
        assert!(body["active_sessions"].is_null());
    }
}
