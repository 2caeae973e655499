//! Application state wiring the relay components together.
//!
//! The core components are generic over their ports; AppState pins them to
//! the concrete in-memory store, echo reply backend, and the type-erased
//! token verifier chosen from configuration.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use relay_core::auth::box_verifier::BoxTokenVerifier;
use relay_core::auth::gate::ConnectionGate;
use relay_core::relay::lifecycle::LifecycleManager;
use relay_core::relay::router::MessageRouter;
use relay_core::reply::echo::EchoReplyGenerator;
use relay_core::transcript::memory::InMemoryTranscriptStore;
use relay_infra::auth::build_token_verifier;
use relay_types::config::RelayConfig;

/// Concrete type aliases for the component generics.
pub type ConcreteGate = ConnectionGate<BoxTokenVerifier>;

pub type ConcreteRouter = MessageRouter<InMemoryTranscriptStore, EchoReplyGenerator>;

pub type ConcreteLifecycle = LifecycleManager<InMemoryTranscriptStore>;

/// Shared state handed to every HTTP and WebSocket handler.
#[derive(Clone)]
pub struct AppState {
    pub gate: Arc<ConcreteGate>,
    pub router: Arc<ConcreteRouter>,
    pub lifecycle: Arc<ConcreteLifecycle>,
    pub store: Arc<InMemoryTranscriptStore>,
    /// Cancelled on server shutdown so live connections close and purge.
    pub shutdown: CancellationToken,
}

impl AppState {
    /// Build the token verifier from config and wire all components.
    pub fn init(config: &RelayConfig) -> anyhow::Result<Self> {
        let verifier = build_token_verifier(config)?;
        tracing::info!(
            provider = ?config.auth.provider,
            cache_ttl_secs = config.auth.cache_ttl_secs,
            "Token verifier ready"
        );
        Ok(Self::new(config, verifier))
    }

    /// Wire all components around an already-built verifier.
    pub fn new(config: &RelayConfig, verifier: BoxTokenVerifier) -> Self {
        let store = Arc::new(InMemoryTranscriptStore::with_max_messages(
            config.max_messages_per_session,
        ));

        let gate = ConnectionGate::new(verifier, Duration::from_millis(config.verify_timeout_ms));
        let router = MessageRouter::new(store.clone(), EchoReplyGenerator);
        let lifecycle = LifecycleManager::new(store.clone(), config.purge_scope);

        Self {
            gate: Arc::new(gate),
            router: Arc::new(router),
            lifecycle: Arc::new(lifecycle),
            store,
            shutdown: CancellationToken::new(),
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use relay_infra::auth::static_tokens::StaticTokenVerifier;
    use relay_types::identity::Identity;

    /// State with a static verifier accepting `token-alice` and `token-bob`.
    pub fn test_state() -> AppState {
        let verifier = StaticTokenVerifier::new()
            .with_token("token-alice", Identity::new("alice"))
            .with_token("token-bob", Identity::new("bob"));
        AppState::new(&RelayConfig::default(), BoxTokenVerifier::new(verifier))
    }
}
