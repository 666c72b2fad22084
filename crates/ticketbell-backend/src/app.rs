//! Application context and message dispatching utilities.
//!
//! The context contains the shared state and provides helpers for sending
//! responses and toasts back to the frontend bridge.

use std::sync::Arc;

use ticketbell_bridge::{
    MessageFromBackend, MessageToBackend,
    toast::{Toast, ToastKind},
};
use tokio::sync::mpsc::{Receiver, Sender};

use crate::services;
use crate::state::SharedState;

/// Shared application context passed to services and message handlers.
pub(crate) struct AppContext {
    /// Runtime application state shared across services.
    pub state: SharedState,
    /// Outbound channel to the frontend bridge.
    pub tx: Sender<MessageFromBackend>,
}

impl AppContext {
    /// Read and dispatch messages from the frontend bridge until it closes.
    ///
    /// Every message is handled on its own task, so a slow request never
    /// delays the ones issued after it. Responses may therefore arrive in a
    /// different order than the requests were sent.
    pub async fn consume_bridge_messages(self: &Arc<Self>, mut rx: Receiver<MessageToBackend>) {
        while let Some(message) = rx.recv().await {
            log::debug!("Got a frontend message: {message:?}");
            let context = self.clone();
            tokio::spawn(async move { context.dispatch_message(message).await });
        }
        log::info!("Frontend bridge closed, stopping backend");
    }

    /// Dispatches the received message from frontend down to individual
    /// service handlers.
    async fn dispatch_message(self: Arc<Self>, message: MessageToBackend) {
        match message {
            MessageToBackend::ConfigurationRequest => {
                services::config_service::handle_config_request(self).await;
            }
            MessageToBackend::FetchUnreadCount => {
                services::notification_service::handle_unread_count_request(self).await;
            }
            MessageToBackend::FetchNotificationPage { page, size } => {
                services::notification_service::handle_page_request(self, page, size).await;
            }
            MessageToBackend::MarkNotificationRead(id) => {
                services::notification_service::handle_mark_read_request(self, id).await;
            }
            MessageToBackend::MarkAllNotificationsRead => {
                services::notification_service::handle_mark_all_read_request(self).await;
            }
            MessageToBackend::DeleteNotification(id) => {
                services::notification_service::handle_delete_request(self, id).await;
            }
            MessageToBackend::DeleteReadNotifications => {
                services::notification_service::handle_delete_read_request(self).await;
            }
        }
    }

    /// Send a message to the frontend bridge.
    pub async fn send(&self, message: MessageFromBackend) {
        if let Err(error) = self.tx.send(message).await {
            log::error!("Failed to send message to frontend: {error}");
        }
    }

    /// Send a toast message to the frontend bridge.
    pub async fn send_toast(&self, kind: ToastKind, content: impl Into<String>) {
        self.send(MessageFromBackend::Toast(Toast::new(kind, content)))
            .await;
    }
}
