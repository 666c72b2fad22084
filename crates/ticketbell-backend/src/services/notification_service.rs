use ticketbell_bridge::{MessageFromBackend, toast::ToastKind};

use crate::client::NotificationClient;

async fn client(context: &super::AppContextHandle) -> NotificationClient {
    let state = context.state.read().await;
    state.client.clone()
}

/// Handles [`ticketbell_bridge::MessageToBackend::FetchUnreadCount`].
pub async fn handle_unread_count_request(context: super::AppContextHandle) {
    let result = client(&context).await.get_unread_count().await;
    context
        .send(MessageFromBackend::UnreadCountResponse(result))
        .await;
}

/// Handles [`ticketbell_bridge::MessageToBackend::FetchNotificationPage`].
pub async fn handle_page_request(context: super::AppContextHandle, page: u32, size: u32) {
    let result = client(&context).await.get_paged(page, size).await;
    context
        .send(MessageFromBackend::NotificationPageResponse { page, result })
        .await;
}

/// Handles [`ticketbell_bridge::MessageToBackend::MarkNotificationRead`].
/// Failures are also reported as an error toast.
pub async fn handle_mark_read_request(context: super::AppContextHandle, id: i64) {
    let result = client(&context).await.mark_read(id).await;
    if let Err(error) = &result {
        context.send_toast(ToastKind::Error, error.to_string()).await;
    }
    context
        .send(MessageFromBackend::NotificationMarkedRead { id, result })
        .await;
}

/// Handles [`ticketbell_bridge::MessageToBackend::MarkAllNotificationsRead`].
pub async fn handle_mark_all_read_request(context: super::AppContextHandle) {
    let result = client(&context)
        .await
        .mark_all_read()
        .await
        .map(|response| response.marked_count);
    if let Ok(Some(marked)) = result {
        log::info!("Marked {marked} notification(s) as read");
    }
    context
        .send(MessageFromBackend::AllNotificationsMarkedRead(result))
        .await;
}

/// Handles [`ticketbell_bridge::MessageToBackend::DeleteNotification`].
/// Failures are also reported as an error toast.
pub async fn handle_delete_request(context: super::AppContextHandle, id: i64) {
    let result = client(&context).await.delete(id).await;
    if let Err(error) = &result {
        context.send_toast(ToastKind::Error, error.to_string()).await;
    }
    context
        .send(MessageFromBackend::NotificationDeleted { id, result })
        .await;
}

/// Handles [`ticketbell_bridge::MessageToBackend::DeleteReadNotifications`].
pub async fn handle_delete_read_request(context: super::AppContextHandle) {
    let result = client(&context)
        .await
        .delete_all_read()
        .await
        .map(|response| response.deleted_count);
    if let Ok(Some(deleted)) = result {
        log::info!("Deleted {deleted} read notification(s)");
    }
    context
        .send(MessageFromBackend::ReadNotificationsDeleted(result))
        .await;
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;
    use ticketbell_bridge::{
        config::{ApiConfig, Config},
        toast::Toast,
    };
    use tokio::sync::{RwLock, mpsc};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::{app::AppContext, state::State};

    fn context_for(
        server: &MockServer,
    ) -> (super::super::AppContextHandle, mpsc::Receiver<MessageFromBackend>) {
        let config = Config {
            api: ApiConfig {
                base_url: server.uri(),
                ..ApiConfig::default()
            },
        };
        let client = NotificationClient::new(&config.api).unwrap();
        let (tx, rx) = mpsc::channel(8);
        let state = Arc::new(RwLock::new(State { config, client }));
        (Arc::new(AppContext { state, tx }), rx)
    }

    #[tokio::test]
    async fn page_response_echoes_requested_page() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/notifications/paged"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "notifications": [],
                "currentPage": 1,
                "totalItems": 10,
                "totalPages": 2
            })))
            .mount(&mock_server)
            .await;
        let (context, mut rx) = context_for(&mock_server);

        handle_page_request(context, 1, 10).await;

        match rx.recv().await {
            Some(MessageFromBackend::NotificationPageResponse { page, result }) => {
                assert_eq!(page, 1);
                assert_eq!(result.unwrap().total_pages, 2);
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[tokio::test]
    async fn failed_mark_read_sends_toast_then_response() {
        let mock_server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/notifications/3/read"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;
        let (context, mut rx) = context_for(&mock_server);

        handle_mark_read_request(context, 3).await;

        match rx.recv().await {
            Some(MessageFromBackend::Toast(Toast { kind, message })) => {
                assert_eq!(kind, ToastKind::Error);
                assert_eq!(message, "Failed to mark notification as read");
            }
            other => panic!("unexpected message: {other:?}"),
        }
        match rx.recv().await {
            Some(MessageFromBackend::NotificationMarkedRead { id, result }) => {
                assert_eq!(id, 3);
                assert!(result.is_err());
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[tokio::test]
    async fn delete_read_reports_deleted_count() {
        let mock_server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/notifications/read"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"deletedCount": 5})))
            .mount(&mock_server)
            .await;
        let (context, mut rx) = context_for(&mock_server);

        handle_delete_read_request(context).await;

        match rx.recv().await {
            Some(MessageFromBackend::ReadNotificationsDeleted(result)) => {
                assert_eq!(result.unwrap(), Some(5));
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }
}
