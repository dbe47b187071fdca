//! Error-notification seam between the manager and the presentation layer.

/// Receives the user-facing message for a failed submission.
///
/// Invoked exactly once per failure. How the message is surfaced (toast,
/// stderr line, status bar) is the presentation layer's business; the
/// manager only guarantees the call.
pub trait Notifier {
    fn notify(&self, message: &str);
}

/// Fallback notifier for headless use: records the message to the
/// diagnostic log and nothing else.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, message: &str) {
        tracing::warn!(message, "Chat failure notice");
    }
}
