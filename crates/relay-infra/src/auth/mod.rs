//! Token verifier adapters and the factory that assembles the configured one.

pub mod cache;
pub mod static_tokens;
pub mod supabase;

use std::time::Duration;

use relay_core::auth::box_verifier::BoxTokenVerifier;
use relay_types::config::{AuthProviderKind, RelayConfig};

use cache::CachingTokenVerifier;
use static_tokens::StaticTokenVerifier;
use supabase::{SupabaseCredentials, SupabaseTokenVerifier};

/// Build the token verifier selected by `config.auth`.
///
/// The Supabase backend reads its credentials from the environment and fails
/// if they are missing. A non-zero `cache_ttl_secs` wraps the backend in a
/// [`CachingTokenVerifier`].
pub fn build_token_verifier(config: &RelayConfig) -> anyhow::Result<BoxTokenVerifier> {
    let backend = match config.auth.provider {
        AuthProviderKind::Supabase => {
            let credentials = SupabaseCredentials::from_env()?;
            BoxTokenVerifier::new(SupabaseTokenVerifier::new(
                credentials,
                Duration::from_millis(config.verify_timeout_ms),
            )?)
        }
        AuthProviderKind::Static => {
            if config.auth.static_tokens.is_empty() {
                tracing::warn!("Static token provider selected with no tokens; every connection will be rejected");
            }
            BoxTokenVerifier::new(StaticTokenVerifier::from_table(&config.auth.static_tokens))
        }
    };

    if config.auth.cache_ttl_secs == 0 {
        return Ok(backend);
    }
    Ok(BoxTokenVerifier::new(CachingTokenVerifier::new(
        backend,
        Duration::from_secs(config.auth.cache_ttl_secs),
    )))
}
