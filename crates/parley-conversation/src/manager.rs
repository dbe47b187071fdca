//! The conversation manager: sole owner and mutator of conversation state.
//!
//! Holds the message log, input buffer, busy flags, and the session
//! identity; drives the request gateway and reports failures through the
//! notification seam. Each submission is a two-state cycle: Idle ->
//! Pending (while the gateway call is outstanding) -> Idle. `can_submit`
//! going false while `sending` is set is the admission control that keeps
//! at most one call in flight; there is no lock and no queue.

use uuid::Uuid;

use parley_core::types::{Message, Sender, Session};
use parley_gateway::{ChatTransport, SendOutcome};

use crate::log::MessageLog;
use crate::notify::Notifier;

// =============================================================================
// ConversationManager
// =============================================================================

/// Owns one conversation: message history, input buffer, busy flags, and
/// the per-lifetime session identifier.
pub struct ConversationManager<T: ChatTransport, N: Notifier> {
    session: Session,
    log: MessageLog,
    input: String,
    sending: bool,
    awaiting_reply: bool,
    transport: T,
    notifier: N,
}

impl<T: ChatTransport, N: Notifier> ConversationManager<T, N> {
    /// Create a manager with a fresh session.
    pub fn new(transport: T, notifier: N) -> Self {
        let session = Session::new();
        tracing::info!(session_id = %session.id, "Conversation started");
        Self {
            session,
            log: MessageLog::new(),
            input: String::new(),
            sending: false,
            awaiting_reply: false,
            transport,
            notifier,
        }
    }

    // -- Read surface --

    /// Message history, in insertion order.
    pub fn messages(&self) -> &[Message] {
        self.log.messages()
    }

    /// Current input buffer, verbatim.
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn is_sending(&self) -> bool {
        self.sending
    }

    pub fn is_awaiting_reply(&self) -> bool {
        self.awaiting_reply
    }

    /// The session identifier attached to every outbound request.
    pub fn session_id(&self) -> Uuid {
        self.session.id
    }

    /// True iff the trimmed input is non-empty and no call is outstanding.
    pub fn can_submit(&self) -> bool {
        !self.input.trim().is_empty() && !self.sending
    }

    // -- Mutators --

    /// Overwrite the input buffer verbatim. Trimming happens only at
    /// submission.
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Run one submission cycle.
    ///
    /// No-op unless `can_submit()`. Appends the trimmed input as a user
    /// message, clears the buffer, and calls the gateway. On a reply the
    /// assistant message is appended with a fresh timestamp; on a failure
    /// the notifier fires once and the history is left as it was — the
    /// user's message stays, the cleared input is not restored.
    pub async fn submit(&mut self) {
        if !self.can_submit() {
            return;
        }

        let trimmed = self.input.trim().to_string();
        self.sending = true;
        self.awaiting_reply = true;
        self.log.append(Sender::User, trimmed.as_str());
        self.input.clear();

        tracing::debug!(session_id = %self.session.id, "Submitting user message");
        let outcome = self.transport.send(&trimmed, self.session.id).await;

        match outcome {
            SendOutcome::Reply(text) => {
                self.log.append(Sender::Assistant, text);
            }
            SendOutcome::Failure(failure) => {
                tracing::error!(
                    kind = failure.kind.as_str(),
                    message = %failure.message,
                    session_id = %self.session.id,
                    "Chat submission failed"
                );
                self.notifier.notify(&failure.message);
            }
        }

        self.sending = false;
        self.awaiting_reply = false;
    }
}

// =============================================================================
// Tests
// =============================================================================
