//! In-memory transcript store backed by a sharded concurrent map.
//!
//! Each key lives in one `DashMap` shard, so writers for unrelated sessions
//! do not contend on a single lock. Nothing here survives a restart.

use dashmap::DashMap;

use relay_types::error::StoreError;
use relay_types::identity::Identity;
use relay_types::transcript::{SessionKey, TranscriptMessage};

use super::store::TranscriptStore;

#[derive(Debug, Default)]
pub struct InMemoryTranscriptStore {
    sessions: DashMap<SessionKey, Vec<TranscriptMessage>>,
    /// Per-session message cap, 0 for unbounded.
    max_messages: usize,
}

impl InMemoryTranscriptStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep at most `max_messages` per session, evicting the oldest pairs.
    ///
    /// The cap is rounded down to an even number (minimum 2) so eviction
    /// never splits a user/assistant pair.
    pub fn with_max_messages(max_messages: usize) -> Self {
        let max_messages = match max_messages {
            0 => 0,
            n => (n - n % 2).max(2),
        };
        Self {
            sessions: DashMap::new(),
            max_messages,
        }
    }

    /// Total number of messages held for `key`.
    pub fn message_count(&self, key: &SessionKey) -> usize {
        self.sessions.get(key).map(|m| m.len()).unwrap_or(0)
    }

    /// Whether any key owned by `identity` is present.
    pub fn has_identity(&self, identity: &Identity) -> bool {
        self.sessions.iter().any(|entry| entry.key().is_owned_by(identity))
    }
}

impl TranscriptStore for InMemoryTranscriptStore {
    async fn history(&self, key: &SessionKey) -> Result<Vec<TranscriptMessage>, StoreError> {
        Ok(self
            .sessions
            .get(key)
            .map(|messages| messages.value().clone())
            .unwrap_or_default())
    }

    async fn append_exchange(
        &self,
        key: &SessionKey,
        user: TranscriptMessage,
        assistant: TranscriptMessage,
    ) -> Result<(), StoreError> {
        // The entry guard holds the shard lock for both pushes.
        let mut messages = self.sessions.entry(key.clone()).or_default();
        messages.push(user);
        messages.push(assistant);

        if self.max_messages > 0 && messages.len() > self.max_messages {
            let excess = messages.len() - self.max_messages;
            messages.drain(..excess);
        }
        Ok(())
    }

    async fn purge_identity(&self, identity: &Identity) -> Result<usize, StoreError> {
        let mut removed = 0;
        self.sessions.retain(|key, _| {
            if key.is_owned_by(identity) {
                removed += 1;
                false
            } else {
                true
            }
        });
        Ok(removed)
    }

    async fn purge_keys(&self, keys: &[SessionKey]) -> Result<usize, StoreError> {
        Ok(keys
            .iter()
            .filter(|key| self.sessions.remove(*key).is_some())
            .count())
    }

    async fn session_count(&self) -> Result<usize, StoreError> {
        Ok(self.sessions.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relay_types::transcript::MessageRole;
    use std::sync::Arc;

    fn key(user: &str, session: &str) -> SessionKey {
        SessionKey::new(Identity::new(user), session)
    }

    async fn exchange(store: &InMemoryTranscriptStore, key: &SessionKey, text: &str) {
        store
            .append_exchange(
                key,
                TranscriptMessage::user(text, &key.session_id),
                TranscriptMessage::assistant(text, &key.session_id),
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn unknown_key_has_empty_history() {
        let store = InMemoryTranscriptStore::new();
        assert!(store.history(&key("alice", "s1")).await.unwrap().is_empty());
        assert_eq!(store.session_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn exchanges_append_in_order() {
        let store = InMemoryTranscriptStore::new();
        let k = key("alice", "s1");
        exchange(&store, &k, "first").await;
        exchange(&store, &k, "second").await;

        let history = store.history(&k).await.unwrap();
        let shape: Vec<_> = history.iter().map(|m| (m.role, m.content.as_str())).collect();
        assert_eq!(
            shape,
            vec![
                (MessageRole::User, "first"),
                (MessageRole::Assistant, "first"),
                (MessageRole::User, "second"),
                (MessageRole::Assistant, "second"),
            ]
        );
    }

    #[tokio::test]
    async fn keys_are_isolated() {
        let store = InMemoryTranscriptStore::new();
        exchange(&store, &key("alice", "s1"), "a1").await;
        exchange(&store, &key("alice", "s2"), "a2").await;
        exchange(&store, &key("bob", "s1"), "b1").await;

        let a1 = store.history(&key("alice", "s1")).await.unwrap();
        assert_eq!(a1.len(), 2);
        assert!(a1.iter().all(|m| m.content == "a1"));
        assert_eq!(store.message_count(&key("alice", "s2")), 2);
        assert_eq!(store.message_count(&key("bob", "s1")), 2);
    }

    #[tokio::test]
    async fn purge_identity_removes_every_session_of_that_user_only() {
        let store = InMemoryTranscriptStore::new();
        exchange(&store, &key("alice", "s1"), "x").await;
        exchange(&store, &key("alice", "s2"), "y").await;
        exchange(&store, &key("bob", "s1"), "z").await;

        let removed = store.purge_identity(&Identity::new("alice")).await.unwrap();
        assert_eq!(removed, 2);
        assert!(!store.has_identity(&Identity::new("alice")));
        assert!(store.has_identity(&Identity::new("bob")));
        assert_eq!(store.session_count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn purge_keys_counts_only_existing() {
        let store = InMemoryTranscriptStore::new();
        exchange(&store, &key("alice", "s1"), "x").await;

        let removed = store
            .purge_keys(&[key("alice", "s1"), key("alice", "missing")])
            .await
            .unwrap();
        assert_eq!(removed, 1);
        assert_eq!(store.session_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn cap_evicts_oldest_pairs() {
        let store = InMemoryTranscriptStore::with_max_messages(5);
        let k = key("alice", "s1");
        for text in ["one", "two", "three"] {
            exchange(&store, &k, text).await;
        }

        let history = store.history(&k).await.unwrap();
        assert_eq!(history.len(), 4);
        assert_eq!(history[0].role, MessageRole::User);
        assert_eq!(history[0].content, "two");
        assert_eq!(history[3].content, "three");
    }

    #[test]
    fn cap_never_drops_below_one_pair() {
        assert_eq!(InMemoryTranscriptStore::with_max_messages(1).max_messages, 2);
        assert_eq!(InMemoryTranscriptStore::with_max_messages(0).max_messages, 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_writers_never_split_pairs() {
        let store = Arc::new(InMemoryTranscriptStore::new());
        let k = key("alice", "shared");

        let mut handles = Vec::new();
        for writer in 0..8 {
            let store = store.clone();
            let k = k.clone();
            handles.push(tokio::spawn(async move {
                for i in 0..25 {
                    let text = format!("w{writer}-{i}");
                    store
                        .append_exchange(
                            &k,
                            TranscriptMessage::user(&text, "shared"),
                            TranscriptMessage::assistant(&text, "shared"),
                        )
                        .await
                        .unwrap();
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let history = store.history(&k).await.unwrap();
        assert_eq!(history.len(), 8 * 25 * 2);
        for pair in history.chunks(2) {
            assert_eq!(pair[0].role, MessageRole::User);
            assert_eq!(pair[1].role, MessageRole::Assistant);
            assert_eq!(pair[0].content, pair[1].content);
        }
    }
}
