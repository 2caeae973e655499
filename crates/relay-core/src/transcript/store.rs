//! TranscriptStore trait definition.
//!
//! Maps a [`SessionKey`] to the ordered list of messages exchanged in that
//! session. Insertion order is conversational order and is never changed.
//! Keys are created lazily by the first exchange and destroyed by purges.

use relay_types::error::StoreError;
use relay_types::identity::Identity;
use relay_types::transcript::{SessionKey, TranscriptMessage};

/// Storage port for live session transcripts.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition) so an
/// external keyed store can implement it as well as the in-memory map.
pub trait TranscriptStore: Send + Sync {
    /// Snapshot of the transcript for `key`, oldest first. Empty if unknown.
    fn history(
        &self,
        key: &SessionKey,
    ) -> impl std::future::Future<Output = Result<Vec<TranscriptMessage>, StoreError>> + Send;

    /// Append a user message and its assistant reply as one contiguous pair,
    /// creating the key if needed. No other entry may land between the two.
    fn append_exchange(
        &self,
        key: &SessionKey,
        user: TranscriptMessage,
        assistant: TranscriptMessage,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    /// Remove every key owned by `identity`. Returns the number of keys removed.
    fn purge_identity(
        &self,
        identity: &Identity,
    ) -> impl std::future::Future<Output = Result<usize, StoreError>> + Send;

    /// Remove the given keys. Returns the number of keys that existed.
    fn purge_keys(
        &self,
        keys: &[SessionKey],
    ) -> impl std::future::Future<Output = Result<usize, StoreError>> + Send;

    /// Number of live session keys.
    fn session_count(&self) -> impl std::future::Future<Output = Result<usize, StoreError>> + Send;
}
