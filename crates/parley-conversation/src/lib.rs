//! Conversation state management for parley.
//!
//! Owns the ordered message history with day-boundary bookkeeping, the
//! input buffer, and the busy flags; drives the request gateway and
//! reports classified failures through the notification seam.

pub mod log;
pub mod manager;
pub mod notify;

pub use log::{day_label, MessageLog};
pub use manager::ConversationManager;
pub use notify::{LogNotifier, Notifier};
