//! Connection lifecycle manager: reclaims transcript memory on disconnect.
//!
//! With [`PurgeScope::Identity`] every key owned by the disconnecting
//! identity is removed, including keys still being written by another live
//! connection of the same user (two browser tabs). [`PurgeScope::Connection`]
//! limits the purge to the session ids this connection wrote.

use std::sync::Arc;

use relay_types::config::PurgeScope;
use relay_types::error::RelayError;
use relay_types::transcript::SessionKey;

use super::connection::ConnectionContext;
use crate::transcript::store::TranscriptStore;

pub struct LifecycleManager<S> {
    store: Arc<S>,
    scope: PurgeScope,
}

impl<S: TranscriptStore> LifecycleManager<S> {
    pub fn new(store: Arc<S>, scope: PurgeScope) -> Self {
        Self { store, scope }
    }

    /// Close `ctx` and purge its transcripts. Returns the number of session
    /// keys removed.
    ///
    /// Idempotent: a context that is already closed purges nothing.
    pub async fn on_disconnect(&self, ctx: &mut ConnectionContext) -> Result<usize, RelayError> {
        if !ctx.close() {
            return Ok(0);
        }

        let owner = ctx.owner();
        let removed = match self.scope {
            PurgeScope::Identity => self.store.purge_identity(&owner).await?,
            PurgeScope::Connection => {
                let keys: Vec<SessionKey> = ctx
                    .touched_sessions()
                    .map(|session_id| SessionKey::new(owner.clone(), session_id))
                    .collect();
                self.store.purge_keys(&keys).await?
            }
        };

        tracing::debug!(
            connection_id = %ctx.id(),
            user_id = %owner,
            scope = %self.scope,
            removed,
            "Purged transcripts on disconnect"
        );
        Ok(removed)
    }
}
