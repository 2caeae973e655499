//! Wire events exchanged over a relay WebSocket connection.
//!
//! Frames are JSON text shaped like Socket.IO events:
//! `{"event": "<name>", "data": <payload>}`.

use serde::{Deserialize, Serialize};

use crate::transcript::TranscriptMessage;

pub const SPEECH_TRANSCRIPT: &str = "speech:transcript";
pub const TRACKING_START: &str = "tracking:start";
pub const PING: &str = "ping";

/// Payload of an inbound `speech:transcript` event.
///
/// Both fields are optional on the wire; the router decides what to drop.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeechTranscript {
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

/// Raw inbound frame before the event name is dispatched.
#[derive(Debug, Deserialize)]
struct InboundFrame {
    event: String,
    #[serde(default)]
    data: serde_json::Value,
}

/// Events a client may send.
#[derive(Debug, Clone, PartialEq)]
pub enum ClientEvent {
    /// A speech fragment. `None` when the frame carried no payload.
    SpeechTranscript(Option<SpeechTranscript>),
    /// Client started activity tracking; acknowledged in logs only.
    TrackingStart(serde_json::Value),
    /// Keep-alive. Answered with [`ServerEvent::Pong`].
    Ping,
    /// Any event name this relay does not handle.
    Unknown(String),
}

impl ClientEvent {
    /// Parse a text frame.
    ///
    /// Fails only when the frame is not JSON, lacks an `event` name, or the
    /// payload of a known event has the wrong shape.
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        let frame: InboundFrame = serde_json::from_str(text)?;
        let event = match frame.event.as_str() {
            SPEECH_TRANSCRIPT => {
                ClientEvent::SpeechTranscript(serde_json::from_value(frame.data)?)
            }
            TRACKING_START => ClientEvent::TrackingStart(frame.data),
            PING => ClientEvent::Ping,
            _ => ClientEvent::Unknown(frame.event),
        };
        Ok(event)
    }
}

/// Payload of an outbound `avatar:response` event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvatarResponse {
    pub session_id: String,
    pub message: TranscriptMessage,
}

/// Events the relay sends to a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", content = "data")]
pub enum ServerEvent {
    #[serde(rename = "avatar:response")]
    AvatarResponse(AvatarResponse),
    #[serde(rename = "pong")]
    Pong,
}
