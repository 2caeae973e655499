//! TTL cache in front of any token verifier.
//!
//! Successful verifications are cached under the SHA-256 digest of the
//! token, so raw tokens are never held in memory longer than the call.
//! Failures are never cached. Expired entries are swept on every insert, so
//! tokens that are never presented again do not accumulate.

use std::time::Duration;

use dashmap::DashMap;
use sha2::{Digest, Sha256};
use tokio::time::Instant;

use relay_core::auth::verifier::TokenVerifier;
use relay_types::error::AuthError;
use relay_types::identity::Identity;

pub struct CachingTokenVerifier<V> {
    inner: V,
    ttl: Duration,
    entries: DashMap<String, (Identity, Instant)>,
}

impl<V: TokenVerifier> CachingTokenVerifier<V> {
    pub fn new(inner: V, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            entries: DashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every expired entry.
    pub fn purge_expired(&self) {
        let ttl = self.ttl;
        self.entries.retain(|_, (_, cached_at)| cached_at.elapsed() < ttl);
    }

    fn cached(&self, digest: &str) -> Option<Identity> {
        let entry = self.entries.get(digest)?;
        let (identity, cached_at) = entry.value();
        (cached_at.elapsed() < self.ttl).then(|| identity.clone())
    }
}

fn token_digest(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}

impl<V: TokenVerifier> TokenVerifier for CachingTokenVerifier<V> {
    fn name(&self) -> &str {
        "cached"
    }

    async fn verify(&self, token: &str) -> Result<Identity, AuthError> {
        let digest = token_digest(token);
        if let Some(identity) = self.cached(&digest) {
            return Ok(identity);
        }

        let identity = self.inner.verify(token).await?;
        self.purge_expired();
        self.entries
            .insert(digest, (identity.clone(), Instant::now()));
        Ok(identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Default)]
    struct CountingVerifier {
        calls: Arc<AtomicUsize>,
    }

    impl TokenVerifier for CountingVerifier {
        fn name(&self) -> &str {
            "counting"
        }

        async fn verify(&self, token: &str) -> Result<Identity, AuthError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if token == "good" {
                Ok(Identity::new("alice"))
            } else {
                Err(AuthError::InvalidToken)
            }
        }
    }

    /// Accepts any token in the list as `alice`.
    struct StaticTokenTable(Vec<String>);

    impl TokenVerifier for StaticTokenTable {
        fn name(&self) -> &str {
            "table"
        }

        async fn verify(&self, token: &str) -> Result<Identity, AuthError> {
            if self.0.iter().any(|t| t == token) {
                Ok(Identity::new("alice"))
            } else {
                Err(AuthError::InvalidToken)
            }
        }
    }

    fn cache() -> (CachingTokenVerifier<CountingVerifier>, Arc<AtomicUsize>) {
        let inner = CountingVerifier::default();
        let calls = inner.calls.clone();
        (CachingTokenVerifier::new(inner, Duration::from_secs(300)), calls)
    }

    #[tokio::test(start_paused = true)]
    async fn hit_within_ttl_skips_backend() {
        let (cache, calls) = cache();
        assert_eq!(cache.verify("good").await.unwrap(), Identity::new("alice"));
        assert_eq!(cache.verify("good").await.unwrap(), Identity::new("alice"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn expired_entry_reverifies() {
        let (cache, calls) = cache();
        cache.verify("good").await.unwrap();
        tokio::time::advance(Duration::from_secs(301)).await;
        cache.verify("good").await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn failures_are_not_cached() {
        let (cache, calls) = cache();
        assert!(cache.verify("bad").await.is_err());
        assert!(cache.verify("bad").await.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(cache.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn purge_expired_drops_stale_entries() {
        let (cache, _) = cache();
        cache.verify("good").await.unwrap();
        assert_eq!(cache.len(), 1);
        tokio::time::advance(Duration::from_secs(301)).await;
        cache.purge_expired();
        assert!(cache.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn insert_sweeps_tokens_never_seen_again() {
        let inner = StaticTokenTable((0..1000).map(|i| format!("token-{i}")).collect());
        let cache = CachingTokenVerifier::new(inner, Duration::from_secs(300));

        for i in 0..1000 {
            cache.verify(&format!("token-{i}")).await.unwrap();
        }
        assert_eq!(cache.len(), 1000);

        tokio::time::advance(Duration::from_secs(3600)).await;
        cache.verify("token-0").await.unwrap();
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn digest_hides_raw_token() {
        let digest = token_digest("secret-token");
        assert_eq!(digest.len(), 64);
        assert!(!digest.contains("secret-token"));
    }
}
