//! Echo reply backend: answers with the user's own words.

use relay_types::error::ReplyError;
use relay_types::transcript::{MessageRole, TranscriptMessage};

use super::generator::ReplyGenerator;

#[derive(Debug, Clone, Copy, Default)]
pub struct EchoReplyGenerator;

impl ReplyGenerator for EchoReplyGenerator {
    fn name(&self) -> &str {
        "echo"
    }

    async fn generate_reply(&self, history: &[TranscriptMessage]) -> Result<String, ReplyError> {
        history
            .iter()
            .rev()
            .find(|m| m.role == MessageRole::User)
            .map(|m| m.content.clone())
            .ok_or(ReplyError::EmptyHistory)
    }
}
