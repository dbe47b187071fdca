//! Append-only message log with day-boundary bookkeeping.
//!
//! The log derives `display_time`, `is_day_boundary`, and `day_label` once
//! at insertion and stores them on the message. Nothing recomputes them
//! later, so a label computed as "Today" does not flip to "Yesterday" after
//! midnight passes.
//!
//! Adjacency is append order: each new message is compared against the
//! immediately preceding entry only. An out-of-order timestamp is a caller
//! error this layer does not correct.

use chrono::{DateTime, Local, NaiveDate};
use uuid::Uuid;

use parley_core::types::{Message, Sender};

// =============================================================================
// MessageLog
// =============================================================================

/// Ordered, append-only sequence of conversation turns.
#[derive(Debug, Default)]
pub struct MessageLog {
    messages: Vec<Message>,
}

impl MessageLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message stamped with the current instant.
    pub fn append(&mut self, sender: Sender, content: impl Into<String>) {
        self.append_at(sender, content, Local::now());
    }

    /// Append a message with an explicit creation instant.
    ///
    /// The day label is still evaluated against the current wall-clock date,
    /// matching what happens when a message is inserted live.
    pub fn append_at(
        &mut self,
        sender: Sender,
        content: impl Into<String>,
        created_at: DateTime<Local>,
    ) {
        let date = created_at.date_naive();
        let is_day_boundary = match self.messages.last() {
            None => true,
            Some(prev) => prev.created_at.date_naive() != date,
        };
        let day_label = is_day_boundary.then(|| day_label(date, Local::now().date_naive()));

        self.messages.push(Message {
            id: Uuid::new_v4(),
            sender,
            content: content.into(),
            created_at,
            display_time: created_at.format("%H:%M").to_string(),
            is_day_boundary,
            day_label,
        });
    }

    /// All messages, in insertion order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Render the separator label for a calendar date, relative to `today`.
pub fn day_label(date: NaiveDate, today: NaiveDate) -> String {
    if date == today {
        "Today".to_string()
    } else if today.pred_opt() == Some(date) {
        "Yesterday".to_string()
    } else {
        date.format("%b %-d, %Y").to_string()
    }
}

// =============================================================================
// Tests
// =============================================================================
