//! Connection gate: admits or rejects a connection based on its bearer token.
//!
//! Runs once per connection, before any message handling. A rejected
//! connection never gets a [`ConnectionContext`], so no router or lifecycle
//! code can run for it. Verification is bounded by a timeout so a hung
//! identity provider cannot leave a connection stuck in `Connecting`.

use std::time::Duration;

use relay_types::error::AuthError;

use super::verifier::TokenVerifier;
use crate::relay::connection::ConnectionContext;

pub struct ConnectionGate<V> {
    verifier: V,
    timeout: Duration,
}

impl<V: TokenVerifier> ConnectionGate<V> {
    pub fn new(verifier: V, timeout: Duration) -> Self {
        Self { verifier, timeout }
    }

    /// Verify the handshake token and return an authenticated context.
    ///
    /// A missing or blank token is rejected without calling the verifier.
    pub async fn admit(&self, token: Option<&str>) -> Result<ConnectionContext, AuthError> {
        let token = token
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::MissingToken)?;

        let identity = tokio::time::timeout(self.timeout, self.verifier.verify(token))
            .await
            .map_err(|_| AuthError::Timeout(self.timeout.as_millis() as u64))??;

        if identity.is_empty() {
            return Err(AuthError::NoIdentity);
        }

        let ctx = ConnectionContext::authenticated(identity);
        tracing::debug!(
            connection_id = %ctx.id(),
            user_id = %ctx.owner(),
            verifier = self.verifier.name(),
            "Connection authenticated"
        );
        Ok(ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relay_types::connection::ConnectionState;
    use relay_types::identity::Identity;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Accepts `token-<user>` and counts calls.
    #[derive(Default)]
    struct PrefixVerifier {
        calls: Arc<AtomicUsize>,
    }

    impl TokenVerifier for PrefixVerifier {
        fn name(&self) -> &str {
            "prefix"
        }

        async fn verify(&self, token: &str) -> Result<Identity, AuthError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match token.strip_prefix("token-") {
                Some(user) => Ok(Identity::new(user)),
                None => Err(AuthError::InvalidToken),
            }
        }
    }

    struct HangingVerifier;

    impl TokenVerifier for HangingVerifier {
        fn name(&self) -> &str {
            "hanging"
        }

        async fn verify(&self, _token: &str) -> Result<Identity, AuthError> {
            std::future::pending::<Result<Identity, AuthError>>().await
        }
    }

    fn gate<V: TokenVerifier>(verifier: V) -> ConnectionGate<V> {
        ConnectionGate::new(verifier, Duration::from_secs(1))
    }

    #[tokio::test]
    async fn valid_token_yields_authenticated_context() {
        let ctx = gate(PrefixVerifier::default())
            .admit(Some("token-alice"))
            .await
            .unwrap();
        assert_eq!(ctx.state(), ConnectionState::Authenticated);
        assert_eq!(ctx.identity(), Some(&Identity::new("alice")));
    }

    #[tokio::test]
    async fn missing_token_rejected_without_calling_verifier() {
        let verifier = PrefixVerifier::default();
        let calls = verifier.calls.clone();
        let gate = gate(verifier);

        assert!(matches!(gate.admit(None).await, Err(AuthError::MissingToken)));
        assert!(matches!(gate.admit(Some("   ")).await, Err(AuthError::MissingToken)));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn rejected_token_propagates_error() {
        let result = gate(PrefixVerifier::default()).admit(Some("garbage")).await;
        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[tokio::test]
    async fn empty_identity_rejected() {
        let result = gate(PrefixVerifier::default()).admit(Some("token-")).await;
        assert!(matches!(result, Err(AuthError::NoIdentity)));
    }

    #[tokio::test(start_paused = true)]
    async fn hung_verifier_times_out() {
        let gate = ConnectionGate::new(HangingVerifier, Duration::from_millis(250));
        let result = gate.admit(Some("anything")).await;
        assert!(matches!(result, Err(AuthError::Timeout(250))));
    }
}
