//! Per-connection streaming session protocol.
//!
//! A session owns one WebSocket and handles requests strictly one at a
//! time: receive, validate, emit a start marker, render the full payload,
//! emit it as fixed-size binary frames, emit an end marker with stats,
//! then wait for the next request. Events of different requests never
//! interleave on a connection.
//!
//! Failure handling follows the taxonomy in `error.rs`: malformed or
//! empty requests are reported to the client and the loop continues;
//! receive, synthesis, and transport failures terminate the session.

use std::time::{Instant, SystemTime, UNIX_EPOCH};

use axum::extract::ws::{Message, WebSocket};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use tts_core::partition;

use crate::error::{RequestError, SessionError};
use crate::validation::validate_text;
use crate::AppState;

/// Default rate delta applied when the client omits one.
pub const DEFAULT_RATE: &str = "+0%";

/// One synthesis request, as sent by the client in a text frame.
#[derive(Debug, Deserialize)]
pub struct SynthesisRequest {
    pub text: String,
    #[serde(default)]
    pub voice: Option<String>,
    #[serde(default)]
    pub rate: Option<String>,
}

/// Control events emitted as JSON text frames. Audio chunks travel as raw
/// binary frames between `Start` and `End`.
#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ControlEvent {
    Start { timestamp: u64 },
    End { chunks: usize, bytes: usize, duration_ms: u64 },
    Error { message: String },
}

/// Run the protocol loop until the client disconnects or a fatal error
/// occurs. Entry point for the WebSocket upgrade handler.
pub async fn handle_session(mut socket: WebSocket, state: AppState) {
    let session_id = Uuid::new_v4();
    state.metrics.record_session_opened();
    info!(%session_id, "session opened");

    match run_session(&mut socket, &state, session_id).await {
        Ok(()) => info!(%session_id, "client disconnected"),
        Err(e) => {
            state.metrics.record_session_error();
            warn!(%session_id, error = %e, "session terminated");
        }
    }
}

async fn run_session(
    socket: &mut WebSocket,
    state: &AppState,
    session_id: Uuid,
) -> Result<(), SessionError> {
    loop {
        let message = match socket.recv().await {
            Some(Ok(message)) => message,
            Some(Err(e)) => return Err(SessionError::Receive(e)),
            None => return Ok(()),
        };

        let text = match message {
            Message::Text(text) => text,
            Message::Close(_) => return Ok(()),
            // Pings are answered by the transport; other frames carry no request
            _ => continue,
        };

        let request = match serde_json::from_str::<SynthesisRequest>(&text) {
            Ok(request) => request,
            Err(e) => {
                let error = RequestError::Malformed(e.to_string());
                debug!(%session_id, %error, "dropping malformed request");
                send_event(socket, &ControlEvent::Error { message: error.to_string() }).await?;
                continue;
            }
        };

        if let Err(error) = validate_text(&request.text, state.config.max_text_length) {
            debug!(%session_id, %error, "dropping invalid request");
            send_event(socket, &ControlEvent::Error { message: error.to_string() }).await?;
            continue;
        }

        stream_request(socket, state, session_id, request).await?;
    }
}

/// Process one validated request: Start, binary chunks, End.
async fn stream_request(
    socket: &mut WebSocket,
    state: &AppState,
    session_id: Uuid,
    request: SynthesisRequest,
) -> Result<(), SessionError> {
    let voice = request
        .voice
        .unwrap_or_else(|| state.config.default_voice.clone());
    let rate = request.rate.unwrap_or_else(|| DEFAULT_RATE.to_string());
    let route = state.routes.route(&voice);

    let started = Instant::now();
    send_event(socket, &ControlEvent::Start { timestamp: unix_millis() }).await?;

    let payload = state
        .synthesizer
        .render(&request.text, &route, &rate)
        .await
        .map_err(SessionError::Synthesis)?;

    let mut chunks = 0usize;
    let mut bytes = 0usize;
    for chunk in partition(&payload, state.config.chunk_size) {
        chunks += 1;
        bytes += chunk.len();
        socket
            .send(Message::Binary(chunk.to_vec().into()))
            .await
            .map_err(SessionError::Transport)?;
        // Yield so one large payload cannot starve other sessions
        tokio::task::yield_now().await;
    }

    let duration_ms = (started.elapsed().as_secs_f64() * 1000.0).round() as u64;
    send_event(socket, &ControlEvent::End { chunks, bytes, duration_ms }).await?;

    state.metrics.record_request(chunks as u64, bytes as u64);
    debug!(%session_id, voice = %voice, chunks, bytes, duration_ms, "request streamed");
    Ok(())
}

async fn send_event(socket: &mut WebSocket, event: &ControlEvent) -> Result<(), SessionError> {
    let json = serde_json::to_string(event)?;
    socket
        .send(Message::Text(json.into()))
        .await
        .map_err(SessionError::Transport)
}

/// Current Unix time in milliseconds.
fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
