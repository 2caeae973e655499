//! BoxTokenVerifier -- object-safe dynamic dispatch wrapper for TokenVerifier.
//!
//! 1. Define an object-safe `TokenVerifierDyn` trait with boxed futures
//! 2. Blanket-impl `TokenVerifierDyn` for all `T: TokenVerifier`
//! 3. `BoxTokenVerifier` wraps `Box<dyn TokenVerifierDyn>` and delegates

use std::future::Future;
use std::pin::Pin;

use relay_types::error::AuthError;
use relay_types::identity::Identity;

use super::verifier::TokenVerifier;

/// Object-safe version of [`TokenVerifier`] with boxed futures.
pub trait TokenVerifierDyn: Send + Sync {
    fn name(&self) -> &str;

    fn verify_boxed<'a>(
        &'a self,
        token: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Identity, AuthError>> + Send + 'a>>;
}

impl<T: TokenVerifier> TokenVerifierDyn for T {
    fn name(&self) -> &str {
        TokenVerifier::name(self)
    }

    fn verify_boxed<'a>(
        &'a self,
        token: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Identity, AuthError>> + Send + 'a>> {
        Box::pin(self.verify(token))
    }
}

/// Type-erased token verifier for runtime backend selection.
///
/// Since `TokenVerifier` uses RPITIT, it cannot be used as a trait object
/// directly. `BoxTokenVerifier` itself implements `TokenVerifier`, so it can
/// be wrapped again (e.g., by a caching layer).
pub struct BoxTokenVerifier {
    inner: Box<dyn TokenVerifierDyn + Send + Sync>,
}

impl BoxTokenVerifier {
    /// Wrap a concrete `TokenVerifier` in a type-erased box.
    pub fn new<T: TokenVerifier + 'static>(verifier: T) -> Self {
        Self {
            inner: Box::new(verifier),
        }
    }
}

impl TokenVerifier for BoxTokenVerifier {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn verify(&self, token: &str) -> Result<Identity, AuthError> {
        self.inner.verify_boxed(token).await
    }
}

impl std::fmt::Debug for BoxTokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoxTokenVerifier")
            .field("name", &self.inner.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedVerifier;

    impl TokenVerifier for FixedVerifier {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn verify(&self, token: &str) -> Result<Identity, AuthError> {
            if token == "good" {
                Ok(Identity::new("user-1"))
            } else {
                Err(AuthError::InvalidToken)
            }
        }
    }

    #[tokio::test]
    async fn box_verifier_delegates() {
        let boxed = BoxTokenVerifier::new(FixedVerifier);
        assert_eq!(TokenVerifier::name(&boxed), "fixed");
        assert_eq!(boxed.verify("good").await.unwrap(), Identity::new("user-1"));
        assert!(matches!(
            boxed.verify("bad").await,
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn debug_impl_shows_backend_name() {
        let boxed = BoxTokenVerifier::new(FixedVerifier);
        assert!(format!("{boxed:?}").contains("fixed"));
    }
}
