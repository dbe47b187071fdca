//! Request gateway for the parley backend.
//!
//! Issues one outbound POST per user message, enforces a time bound, and
//! classifies every failure into a closed set of user-facing categories.

pub mod classify;
pub mod gateway;
pub mod wire;

pub use classify::{classify_status, classify_transport, FailureKind, SendFailure};
pub use gateway::{ChatGateway, ChatTransport, SendOutcome};
pub use wire::{ChatReply, ChatRequest, ErrorBody};
