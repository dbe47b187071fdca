//! The request gateway: one outbound call per user message.
//!
//! Stateless and safe to invoke concurrently; one-call-at-a-time discipline
//! is the caller's responsibility. No retries — a retry is a fresh
//! invocation by the caller.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use uuid::Uuid;

use parley_core::config::BackendConfig;

use crate::classify::{classify_status, classify_transport, FailureKind, SendFailure};
use crate::wire::{ChatReply, ChatRequest, ErrorBody};

// =============================================================================
// SendOutcome / ChatTransport
// =============================================================================

/// The closed result of one gateway call. A call never errors across this
/// boundary: it terminates in either a reply or a classified failure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SendOutcome {
    Reply(String),
    Failure(SendFailure),
}

/// The seam between the conversation layer and the wire.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send(&self, text: &str, session_id: Uuid) -> SendOutcome;
}

// =============================================================================
// ChatGateway
// =============================================================================

/// HTTP implementation of [`ChatTransport`] against the backend chat
/// endpoint.
#[derive(Clone)]
pub struct ChatGateway {
    client: Client,
    endpoint: String,
    timeout: Duration,
}

impl ChatGateway {
    /// Create a gateway for the given endpoint with an explicit time bound.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            timeout,
        }
    }

    /// Create a gateway from backend configuration.
    pub fn from_config(config: &BackendConfig) -> Self {
        Self::new(&config.endpoint, Duration::from_secs(config.timeout_secs))
    }

    /// The configured endpoint URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ChatTransport for ChatGateway {
    async fn send(&self, text: &str, session_id: Uuid) -> SendOutcome {
        let request = ChatRequest {
            message: text.to_string(),
            session_id,
        };

        let call = self
            .client
            .post(&self.endpoint)
            .header("content-type", "application/json")
            .json(&request)
            .send();

        let response = match tokio::time::timeout(self.timeout, call).await {
            Err(_) => {
                tracing::error!(
                    timeout_secs = self.timeout.as_secs(),
                    endpoint = %self.endpoint,
                    "Chat request abandoned: time bound elapsed"
                );
                return SendOutcome::Failure(SendFailure::from_kind(FailureKind::Timeout));
            }
            Ok(Err(err)) => {
                let kind = classify_transport(&err);
                tracing::error!(
                    error = %err,
                    kind = kind.as_str(),
                    endpoint = %self.endpoint,
                    "Chat request failed before a response arrived"
                );
                return SendOutcome::Failure(SendFailure::from_kind(kind));
            }
            Ok(Ok(response)) => response,
        };

        let status = response.status();
        if !status.is_success() {
            let detail = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.error);
            let failure = classify_status(status.as_u16(), detail.as_deref());
            tracing::error!(
                status = status.as_u16(),
                kind = failure.kind.as_str(),
                detail = detail.as_deref().unwrap_or(""),
                "Chat request returned an error status"
            );
            return SendOutcome::Failure(failure);
        }

        match response.json::<ChatReply>().await {
            Ok(reply) => SendOutcome::Reply(reply.response),
            Err(err) => {
                tracing::error!(error = %err, "Chat response body was not the expected shape");
                SendOutcome::Failure(SendFailure::from_kind(FailureKind::Unknown))
            }
        }
    }
}
