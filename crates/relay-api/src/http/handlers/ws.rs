//! WebSocket handler for the realtime transcript relay.
//!
//! The `/ws` endpoint upgrades an HTTP connection to a WebSocket once the
//! [`Authenticated`] extractor has admitted it. Each connection is served by
//! its own task, which:
//!
//! - **Routes frames in order:** text frames are parsed as client events and
//!   handed to the message router one at a time, so a connection's speech
//!   events are never processed concurrently or out of order.
//! - **Replies to the sender only:** the router's response is written back
//!   on the same socket; nothing is broadcast.
//! - **Cleans up on exit:** when the client disconnects (or the server shuts
//!   down) the lifecycle manager purges the connection's transcripts.
//!
//! Malformed frames and failed events are logged and skipped; they never
//! close the connection or affect other connections.

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use futures_util::{SinkExt, StreamExt};
use tracing::Instrument;

use relay_core::relay::connection::ConnectionContext;
use relay_observe::fields;
use relay_types::event::ClientEvent;

use crate::http::extractors::auth::Authenticated;
use crate::state::{AppState, ConcreteRouter};

/// Upgrade an authenticated HTTP request to a relay connection.
///
/// This is mounted at `/ws` in the router.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    Authenticated(ctx): Authenticated,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_ws_connection(socket, state, ctx))
}

/// Serve one connection until the client leaves or the server shuts down.
async fn handle_ws_connection(socket: WebSocket, state: AppState, mut ctx: ConnectionContext) {
    let span = tracing::info_span!(
        fields::CONNECTION_SPAN,
        connection_id = tracing::field::Empty,
        user_id = tracing::field::Empty
    );
    span.record(fields::CONNECTION_ID, tracing::field::display(ctx.id()));
    span.record(fields::USER_ID, tracing::field::display(ctx.owner()));

    async move {
        if let Err(err) = ctx.activate() {
            tracing::warn!(error = %err, "Could not activate connection");
            return;
        }
        tracing::info!("Connection opened");

        let (mut ws_sender, mut ws_receiver) = socket.split();

        loop {
            tokio::select! {
                _ = state.shutdown.cancelled() => {
                    let _ = ws_sender.send(Message::Close(None)).await;
                    break;
                }

                msg_result = ws_receiver.next() => {
                    match msg_result {
                        Some(Ok(Message::Text(text))) => {
                            if let Some(reply) = process_frame(&state.router, &mut ctx, text.as_str()).await {
                                if ws_sender.send(Message::Text(reply.into())).await.is_err() {
                                    // Client disconnected
                                    break;
                                }
                            }
                        }
                        Some(Ok(Message::Close(_))) | None => {
                            break;
                        }
                        Some(Err(err)) => {
                            tracing::debug!("WebSocket receive error: {err}");
                            break;
                        }
                        // Binary frames are not part of the protocol; ping/pong is handled by axum.
                        Some(Ok(_)) => {}
                    }
                }
            }
        }

        match state.lifecycle.on_disconnect(&mut ctx).await {
            Ok(removed) => tracing::info!(removed, "Connection closed"),
            Err(err) => tracing::warn!(error = %err, "Transcript cleanup failed"),
        }
    }
    .instrument(span)
    .await
}

/// Parse and route a single text frame. Returns the serialized reply, if any.
async fn process_frame(
    router: &ConcreteRouter,
    ctx: &mut ConnectionContext,
    text: &str,
) -> Option<String> {
    let event = match ClientEvent::parse(text) {
        Ok(event) => event,
        Err(err) => {
            tracing::debug!(error = %err, "Ignoring malformed frame");
            return None;
        }
    };

    let reply = match router.route(ctx, event).await {
        Ok(reply) => reply?,
        Err(err) => {
            tracing::warn!(error = %err, "Failed to handle event");
            return None;
        }
    };

    match serde_json::to_string(&reply) {
        Ok(json) => Some(json),
        Err(err) => {
            tracing::warn!("Failed to serialize ServerEvent: {err}");
            None
        }
    }
}
