/// Backend endpoints the client can call. Each one owns the message shown
/// when a call fails without a server-provided explanation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    GetAll,
    GetPaged,
    GetUnread,
    GetUnreadCount,
    MarkRead,
    MarkAllRead,
    Delete,
    DeleteAllRead,
    GetByType,
    GetByTypeAndReadStatus,
    GetCountByTypeAndReadStatus,
}

impl Operation {
    pub fn default_message(self) -> &'static str {
        match self {
            Operation::GetAll => "Failed to load notifications",
            Operation::GetPaged => "Failed to load notifications",
            Operation::GetUnread => "Failed to load unread notifications",
            Operation::GetUnreadCount => "Failed to load unread notification count",
            Operation::MarkRead => "Failed to mark notification as read",
            Operation::MarkAllRead => "Failed to mark all notifications as read",
            Operation::Delete => "Failed to delete notification",
            Operation::DeleteAllRead => "Failed to delete read notifications",
            Operation::GetByType => "Failed to load notifications by type",
            Operation::GetByTypeAndReadStatus => {
                "Failed to load notifications by type and read status"
            }
            Operation::GetCountByTypeAndReadStatus => "Failed to load notification count",
        }
    }
}

/// Uniform failure of a notification service call.
///
/// Transport errors, unexpected statuses and undecodable bodies all end up
/// here; only the human-readable message survives.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ServiceError {
    pub operation: Operation,
    pub message: String,
}

impl ServiceError {
    /// Builds an error carrying `message` when it is present and non-blank,
    /// otherwise the operation's default message.
    pub fn new(operation: Operation, message: Option<String>) -> Self {
        let message = message
            .filter(|message| !message.trim().is_empty())
            .unwrap_or_else(|| operation.default_message().to_string());
        Self { operation, message }
    }

    /// Builds an error carrying the operation's default message.
    pub fn default_for(operation: Operation) -> Self {
        Self::new(operation, None)
    }
}
