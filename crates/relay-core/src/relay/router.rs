//! Message router: processes inbound events for one authenticated connection.
//!
//! For each well-formed `speech:transcript` event the router records the
//! user's words and the assistant's reply as one contiguous pair under the
//! connection's `(identity, sessionId)` key, then hands the reply back for
//! emission on the same connection only.
//!
//! Events with no payload or empty text are dropped silently: live speech
//! transcription is best-effort and fragments are frequently empty.

use std::sync::Arc;

use relay_types::error::RelayError;
use relay_types::event::{AvatarResponse, ClientEvent, ServerEvent, SpeechTranscript};
use relay_types::transcript::{SessionKey, TranscriptMessage};

use super::connection::ConnectionContext;
use crate::reply::generator::ReplyGenerator;
use crate::transcript::store::TranscriptStore;

pub struct MessageRouter<S, R> {
    store: Arc<S>,
    replies: R,
}

impl<S: TranscriptStore, R: ReplyGenerator> MessageRouter<S, R> {
    pub fn new(store: Arc<S>, replies: R) -> Self {
        Self { store, replies }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Dispatch one parsed client event. Returns the event to send back, if any.
    ///
    /// A context that is not `Active` (e.g., already torn down) is a no-op.
    pub async fn route(
        &self,
        ctx: &mut ConnectionContext,
        event: ClientEvent,
    ) -> Result<Option<ServerEvent>, RelayError> {
        if !ctx.is_active() {
            tracing::debug!(
                connection_id = %ctx.id(),
                state = %ctx.state(),
                "Ignoring event for inactive connection"
            );
            return Ok(None);
        }

        match event {
            ClientEvent::SpeechTranscript(payload) => Ok(self
                .handle_speech(ctx, payload)
                .await?
                .map(ServerEvent::AvatarResponse)),
            ClientEvent::TrackingStart(_) => {
                // Payload is client-controlled; only the event is logged.
                tracing::debug!(
                    connection_id = %ctx.id(),
                    user_id = %ctx.owner(),
                    "Tracking started"
                );
                Ok(None)
            }
            ClientEvent::Ping => Ok(Some(ServerEvent::Pong)),
            ClientEvent::Unknown(name) => {
                tracing::debug!(connection_id = %ctx.id(), event = %name, "Ignoring unknown event");
                Ok(None)
            }
        }
    }

    /// Handle one speech fragment end-to-end.
    ///
    /// Returns `Ok(None)` when the fragment is dropped. On error nothing has
    /// been written to the transcript.
    pub async fn handle_speech(
        &self,
        ctx: &mut ConnectionContext,
        payload: Option<SpeechTranscript>,
    ) -> Result<Option<AvatarResponse>, RelayError> {
        if !ctx.is_active() {
            return Ok(None);
        }

        let Some(SpeechTranscript { session_id, text }) = payload else {
            return Ok(None);
        };
        let Some(text) = text.filter(|t| !t.is_empty()) else {
            return Ok(None);
        };

        let key = SessionKey::resolve(ctx.owner(), session_id.as_deref());
        let user = TranscriptMessage::user(text, &key.session_id);

        let mut history = self.store.history(&key).await?;
        history.push(user.clone());
        let content = self.replies.generate_reply(&history).await?;
        let assistant = TranscriptMessage::assistant(content, &key.session_id);

        self.store
            .append_exchange(&key, user, assistant.clone())
            .await?;
        ctx.record_session(&key.session_id);

        tracing::debug!(
            connection_id = %ctx.id(),
            session = %key,
            reply_backend = self.replies.name(),
            "Recorded speech exchange"
        );

        Ok(Some(AvatarResponse {
            session_id: key.session_id,
            message: assistant,
        }))
    }
}
