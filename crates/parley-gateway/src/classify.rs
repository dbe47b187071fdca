//! Failure classification for the request gateway.
//!
//! Every failure at the gateway boundary collapses into exactly one of the
//! categories below. The mapping here is the single source of truth: the
//! conversation layer never interprets raw transport errors or status codes,
//! only the classified category/message pair.

use serde::{Deserialize, Serialize};

// =============================================================================
// FailureKind
// =============================================================================

/// Closed set of failure categories for a chat request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Client-side network fault that is not a refused connection.
    ClientNetwork,
    /// Transport-level failure with no response reachable, or connection
    /// actively refused.
    Unreachable,
    /// The time bound elapsed before a response arrived.
    Timeout,
    /// Response status in [400, 500).
    ClientError,
    /// Response status >= 500.
    ServerError,
    /// Anything unrecognized, including a malformed success body.
    Unknown,
}

impl FailureKind {
    /// Fixed user-facing message for this category.
    ///
    /// `ClientError` may carry a server-supplied detail instead; see
    /// [`classify_status`].
    pub fn user_message(&self) -> &'static str {
        match self {
            FailureKind::ClientNetwork => {
                "Unable to connect to the server. Please check your connection."
            }
            FailureKind::Unreachable => {
                "Unable to reach the server. Please ensure the backend is running."
            }
            FailureKind::Timeout => "Request timed out. Please try again.",
            FailureKind::ClientError => "Invalid request. Please try again.",
            FailureKind::ServerError => "Server error. Please try again later.",
            FailureKind::Unknown => "An unexpected error occurred. Please try again.",
        }
    }

    /// Snake-case category name for structured logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::ClientNetwork => "client_network",
            FailureKind::Unreachable => "unreachable",
            FailureKind::Timeout => "timeout",
            FailureKind::ClientError => "client_error",
            FailureKind::ServerError => "server_error",
            FailureKind::Unknown => "unknown",
        }
    }
}

// =============================================================================
// SendFailure
// =============================================================================

/// A classified failure: the category plus the message to surface to the
/// user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SendFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl SendFailure {
    /// Failure carrying the category's fixed user-facing message.
    pub fn from_kind(kind: FailureKind) -> Self {
        Self {
            kind,
            message: kind.user_message().to_string(),
        }
    }
}

// =============================================================================
// Classification
// =============================================================================

/// Classify a non-success HTTP status, preferring a non-empty server-supplied
/// `error` detail for 4xx responses.
pub fn classify_status(status: u16, body_error: Option<&str>) -> SendFailure {
    match status {
        400..=499 => {
            let message = match body_error {
                Some(detail) if !detail.is_empty() => detail.to_string(),
                _ => FailureKind::ClientError.user_message().to_string(),
            };
            SendFailure {
                kind: FailureKind::ClientError,
                message,
            }
        }
        s if s >= 500 => SendFailure::from_kind(FailureKind::ServerError),
        // 1xx/3xx should not surface here; treat as unrecognized.
        _ => SendFailure::from_kind(FailureKind::Unknown),
    }
}

/// Classify a transport-level error that produced no HTTP response.
pub fn classify_transport(err: &reqwest::Error) -> FailureKind {
    if err.is_timeout() {
        FailureKind::Timeout
    } else if err.is_connect() {
        FailureKind::Unreachable
    } else if err.is_request() || err.is_body() || err.is_redirect() {
        FailureKind::ClientNetwork
    } else {
        FailureKind::Unknown
    }
}
