//! ReplyGenerator trait definition.

use relay_types::error::ReplyError;
use relay_types::transcript::TranscriptMessage;

/// Trait for assistant reply backends.
///
/// `history` is the session transcript oldest-first, with the pending user
/// message as its last entry.
pub trait ReplyGenerator: Send + Sync {
    /// Human-readable backend name (e.g., "echo").
    fn name(&self) -> &str;

    fn generate_reply(
        &self,
        history: &[TranscriptMessage],
    ) -> impl std::future::Future<Output = Result<String, ReplyError>> + Send;
}
