//! Flow client error types

use thiserror::Error;

/// Flow request error with classification
#[derive(Debug, Error)]
#[error("{message}")]
pub struct FlowError {
    pub kind: FlowErrorKind,
    pub message: String,
}

impl FlowError {
    pub fn new(kind: FlowErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(FlowErrorKind::Network, message)
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(FlowErrorKind::Decode, message)
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(FlowErrorKind::Config, message)
    }

    /// Classify a non-success HTTP status
    pub fn from_status(status: u16, body: &str) -> Self {
        let kind = match status {
            400..=499 => FlowErrorKind::InvalidRequest,
            500..=599 => FlowErrorKind::ServerError,
            _ => FlowErrorKind::Network,
        };
        let detail = body.trim();
        let message = if detail.is_empty() {
            format!("Flow server returned HTTP {status}")
        } else {
            format!("Flow server returned HTTP {status}: {detail}")
        };
        Self::new(kind, message)
    }

    pub fn from_reqwest(e: &reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::new(FlowErrorKind::Timeout, format!("Request timed out: {e}"))
        } else if e.is_decode() {
            Self::decode(format!("Malformed response: {e}"))
        } else {
            Self::network(format!("Request failed: {e}"))
        }
    }
}

/// Error classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowErrorKind {
    /// Connection refused, DNS, reset
    Network,
    /// Client-side timeout elapsed
    Timeout,
    /// 5xx from the flow server
    ServerError,
    /// 4xx from the flow server (unknown flow, bad body)
    InvalidRequest,
    /// Body was not JSON or did not match the envelope
    Decode,
    /// Client could not be constructed
    Config,
}
