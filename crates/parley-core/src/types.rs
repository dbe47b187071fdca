use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// Enums
// =============================================================================

/// The author of a conversation turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    /// Text typed by the person at the keyboard.
    User,
    /// Text returned by the backend.
    Assistant,
}

// =============================================================================
// Message
// =============================================================================

/// One conversation turn in the message log.
///
/// `display_time`, `is_day_boundary`, and `day_label` are derived once at
/// insertion time and never recomputed, so a message keeps the time and
/// day label it was created with even if rendered much later.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Message {
    /// Unique identifier, assigned at creation, never reused.
    pub id: Uuid,
    pub sender: Sender,
    /// Text exactly as submitted or received, including line breaks.
    pub content: String,
    /// Creation instant.
    pub created_at: DateTime<Local>,
    /// Zero-padded 24-hour `HH:MM`, frozen at insertion.
    pub display_time: String,
    /// True for the first message of the log or the first message whose
    /// local calendar date differs from the preceding message's.
    pub is_day_boundary: bool,
    /// Present only when `is_day_boundary` is true.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day_label: Option<String>,
}

// =============================================================================
// Session
// =============================================================================

/// Correlation identity for one conversation lifetime.
///
/// Generated once at manager construction and attached to every outbound
/// request. Never persisted; a new manager instance gets a new, unrelated
/// session.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub started_at: DateTime<Local>,
}

impl Session {
    /// Create a fresh session with a random v4 identifier.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Local::now(),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
