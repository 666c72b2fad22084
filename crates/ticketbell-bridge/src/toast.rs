/// Severity of a transient toast shown by the frontend.
///
/// Toasts are the application's own status messages (failed actions,
/// configuration fallbacks). They are unrelated to the booking
/// notifications fetched from the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    /// Neutral informational message.
    Info,
    /// An operation finished successfully.
    Success,
    /// Something degraded but the application keeps working.
    Warning,
    /// An operation failed.
    Error,
}

/// A toast payload intended for the user interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    /// Severity, determining the visual style.
    pub kind: ToastKind,
    /// The text content to display to the user.
    pub message: String,
}

impl Toast {
    pub fn new(kind: ToastKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}
