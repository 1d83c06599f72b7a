use thiserror::Error;

/// Request-level failures, recovered locally.
///
/// The `Display` text is sent to the client verbatim in an error event, so
/// the session continues after reporting one of these.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestError {
    #[error("Empty text")]
    EmptyText,

    #[error("Text too long (max {0} characters)")]
    TextTooLong(usize),

    #[error("Invalid request: {0}")]
    Malformed(String),
}

/// Session-level failures, classified per operation.
///
/// Any of these terminates the session: the loop logs the error and the
/// connection is torn down. A clean disconnect is not an error and never
/// reaches this type.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("receive failed: {0}")]
    Receive(#[source] axum::Error),

    #[error("synthesis failed: {0}")]
    Synthesis(#[source] anyhow::Error),

    #[error("send failed: {0}")]
    Transport(#[source] axum::Error),

    #[error("event encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
}
