//! TokenVerifier trait definition.
//!
//! The relay never validates credentials itself. An external identity
//! provider turns an opaque bearer token into a user identity; any backend
//! implementing this single method satisfies the contract.

use relay_types::error::AuthError;
use relay_types::identity::Identity;

/// Trait for bearer-token verification backends.
///
/// Implementations live in relay-infra (e.g., `SupabaseTokenVerifier`).
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
pub trait TokenVerifier: Send + Sync {
    /// Human-readable backend name (e.g., "supabase", "static").
    fn name(&self) -> &str;

    /// Verify `token` and return the identity it belongs to.
    fn verify(
        &self,
        token: &str,
    ) -> impl std::future::Future<Output = Result<Identity, AuthError>> + Send;
}
