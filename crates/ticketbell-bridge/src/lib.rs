//! Communication bridge between frontend and backend.
//!
//! This crate defines the types shared by the desktop frontend and the
//! asynchronous backend that talks to the booking service's notifications
//! API:
//! - The frontend sends commands (fetch a page, mark a notification read,
//!   delete read notifications, request the configuration).
//! - The backend answers each command with exactly one response message and
//!   may push toasts on its own.
//!
//! Communication happens over bounded [`tokio::sync::mpsc`] channels wrapped
//! in [`BridgeChannels`].

pub mod config;
pub mod enums;
pub mod error;
pub mod notification;
pub mod toast;

use tokio::sync::mpsc::{self, Receiver, Sender};

use crate::error::ServiceError;
use crate::notification::{NotificationCount, NotificationPage};

/// Messages emitted by the backend to inform the frontend of state updates.
#[derive(Debug, Clone)]
pub enum MessageFromBackend {
    /// Transient status message for the toast layer.
    Toast(toast::Toast),
    /// Response to the configuration request from the frontend.
    ConfigurationResponse(config::Config),
    /// Answer to [`MessageToBackend::FetchUnreadCount`].
    UnreadCountResponse(Result<NotificationCount, ServiceError>),
    /// Answer to [`MessageToBackend::FetchNotificationPage`].
    NotificationPageResponse {
        page: u32,
        result: Result<NotificationPage, ServiceError>,
    },
    /// Answer to [`MessageToBackend::MarkNotificationRead`].
    NotificationMarkedRead {
        id: i64,
        result: Result<(), ServiceError>,
    },
    /// Answer to [`MessageToBackend::MarkAllNotificationsRead`], carrying the
    /// number of updated notifications when the server reports it.
    AllNotificationsMarkedRead(Result<Option<u64>, ServiceError>),
    /// Answer to [`MessageToBackend::DeleteNotification`].
    NotificationDeleted {
        id: i64,
        result: Result<(), ServiceError>,
    },
    /// Answer to [`MessageToBackend::DeleteReadNotifications`], carrying the
    /// number of removed notifications when the server reports it.
    ReadNotificationsDeleted(Result<Option<u64>, ServiceError>),
}

/// Commands issued by the frontend to query or mutate notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageToBackend {
    /// Request for the application configuration.
    ConfigurationRequest,
    /// Request for the current user's unread notification count.
    FetchUnreadCount,
    /// Request for one page of notifications.
    FetchNotificationPage { page: u32, size: u32 },
    MarkNotificationRead(i64),
    MarkAllNotificationsRead,
    DeleteNotification(i64),
    DeleteReadNotifications,
}

/// Paired `tokio::mpsc` channels for bidirectional communication between
/// frontend and backend.
pub struct BridgeChannels {
    /// Receiver used by the frontend to get messages from the backend.
    pub frontend_rx: Receiver<MessageFromBackend>,
    /// Sender used by the frontend to send commands to the backend.
    pub frontend_tx: Sender<MessageToBackend>,

    /// Receiver used by the backend to get commands from the frontend.
    pub backend_rx: Receiver<MessageToBackend>,
    /// Sender used by the backend to send events/responses to the frontend.
    pub backend_tx: Sender<MessageFromBackend>,
}

impl BridgeChannels {
    /// Creates a new pair of bridged channels with the given buffer capacity.
    pub fn new(buffer: usize) -> Self {
        let (to_backend_tx, to_backend_rx) = mpsc::channel(buffer);
        let (to_frontend_tx, to_frontend_rx) = mpsc::channel(buffer);
        Self {
            frontend_tx: to_backend_tx,
            frontend_rx: to_frontend_rx,
            backend_rx: to_backend_rx,
            backend_tx: to_frontend_tx,
        }
    }
}

impl Default for BridgeChannels {
    fn default() -> Self {
        Self::new(64)
    }
}
