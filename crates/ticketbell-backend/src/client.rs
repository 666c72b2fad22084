//! HTTP client for the booking backend's notifications API.
//!
//! Every endpoint gets one method issuing exactly one request. Whatever goes
//! wrong on the way (connection errors, non-2xx statuses, bodies that do not
//! decode) is logged with its cause and surfaced as a
//! [`ServiceError`] carrying only a human-readable message.

use std::time::Duration;

use reqwest::{Client, Method, Response};
use serde::{Deserialize, de::DeserializeOwned};
use ticketbell_bridge::{
    config::ApiConfig,
    enums::ClosedEnum,
    error::{Operation, ServiceError},
    notification::{
        DeleteReadResponse, MarkAllReadResponse, Notification, NotificationCount,
        NotificationPage, NotificationType,
    },
};
use url::Url;

/// Path of the notifications API below the configured origin.
const API_PATH: &str = "/api/notifications";

/// Errors that can occur while constructing a [`NotificationClient`].
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The configured base URL is not an absolute URL.
    #[error("invalid API base url {url:?}: {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    /// The underlying HTTP client could not be created (TLS backend, etc).
    #[error("failed to build HTTP client: {0}")]
    Build(#[from] reqwest::Error),
}

/// Error body returned by the backend on failed requests.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
    error: Option<String>,
}

/// Client for `/api/notifications`. Cheap to clone; clones share the
/// connection pool.
#[derive(Debug, Clone)]
pub struct NotificationClient {
    api_root: String,
    http: Client,
    access_token: Option<String>,
}

impl NotificationClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ClientError> {
        let base = Url::parse(&config.base_url).map_err(|source| ClientError::InvalidBaseUrl {
            url: config.base_url.clone(),
            source,
        })?;

        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs.max(1)))
            .user_agent(concat!("ticketbell/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            api_root: format!("{}{API_PATH}", base.as_str().trim_end_matches('/')),
            http,
            access_token: config.access_token.clone().filter(|token| !token.is_empty()),
        })
    }

    /// Fetches every notification of the current user.
    pub async fn get_all(&self) -> Result<Vec<Notification>, ServiceError> {
        self.fetch(Operation::GetAll, Method::GET, "", &[]).await
    }

    /// Fetches one page. `page` is 0-based; `size` is raised to at least 1.
    pub async fn get_paged(&self, page: u32, size: u32) -> Result<NotificationPage, ServiceError> {
        let query = [("page", page.to_string()), ("size", size.max(1).to_string())];
        self.fetch(Operation::GetPaged, Method::GET, "/paged", &query)
            .await
    }

    pub async fn get_unread(&self) -> Result<Vec<Notification>, ServiceError> {
        self.fetch(Operation::GetUnread, Method::GET, "/unread", &[])
            .await
    }

    pub async fn get_unread_count(&self) -> Result<NotificationCount, ServiceError> {
        self.fetch(Operation::GetUnreadCount, Method::GET, "/unread/count", &[])
            .await
    }

    pub async fn mark_read(&self, id: i64) -> Result<(), ServiceError> {
        self.execute(Operation::MarkRead, Method::PUT, &format!("/{id}/read"), &[])
            .await
            .map(drop)
    }

    pub async fn mark_all_read(&self) -> Result<MarkAllReadResponse, ServiceError> {
        self.fetch_or_default(Operation::MarkAllRead, Method::POST, "/read-all")
            .await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        self.execute(Operation::Delete, Method::DELETE, &format!("/{id}"), &[])
            .await
            .map(drop)
    }

    pub async fn delete_all_read(&self) -> Result<DeleteReadResponse, ServiceError> {
        self.fetch_or_default(Operation::DeleteAllRead, Method::DELETE, "/read")
            .await
    }

    /// Older name of [`Self::delete_all_read`]. The response counters are
    /// discarded.
    #[deprecated(note = "use `delete_all_read` instead")]
    pub async fn delete_all(&self) -> Result<(), ServiceError> {
        self.delete_all_read().await.map(drop)
    }

    pub async fn get_by_type(
        &self,
        notification_type: NotificationType,
    ) -> Result<Vec<Notification>, ServiceError> {
        let path = format!("/type/{}", notification_type.value());
        self.fetch(Operation::GetByType, Method::GET, &path, &[])
            .await
    }

    pub async fn get_by_type_and_read_status(
        &self,
        notification_type: NotificationType,
        read: bool,
    ) -> Result<Vec<Notification>, ServiceError> {
        let path = format!("/type/{}/read/{read}", notification_type.value());
        self.fetch(Operation::GetByTypeAndReadStatus, Method::GET, &path, &[])
            .await
    }

    pub async fn get_count_by_type_and_read_status(
        &self,
        notification_type: NotificationType,
        read: bool,
    ) -> Result<NotificationCount, ServiceError> {
        let path = format!("/type/{}/read/{read}/count", notification_type.value());
        self.fetch(
            Operation::GetCountByTypeAndReadStatus,
            Method::GET,
            &path,
            &[],
        )
        .await
    }

    /// Sends the request and returns the response when its status is 2xx.
    async fn execute(
        &self,
        operation: Operation,
        method: Method,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Response, ServiceError> {
        let url = format!("{}{path}", self.api_root);
        log::debug!("{method} {url}");

        let mut request = self.http.request(method, &url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(token) = &self.access_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|error| {
            log::error!("{operation:?} request to {url} failed: {error}");
            ServiceError::default_for(operation)
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        log::error!("{operation:?} request to {url} returned {status}");
        let message = response
            .json::<ApiErrorBody>()
            .await
            .ok()
            .and_then(|body| body.message.or(body.error));
        Err(ServiceError::new(operation, message))
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        operation: Operation,
        method: Method,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ServiceError> {
        let response = self.execute(operation, method, path, query).await?;
        response.json::<T>().await.map_err(|error| {
            log::error!("{operation:?} response could not be decoded: {error}");
            ServiceError::default_for(operation)
        })
    }

    /// Like [`Self::fetch`], but an empty body decodes to `T::default()`.
    async fn fetch_or_default<T: DeserializeOwned + Default>(
        &self,
        operation: Operation,
        method: Method,
        path: &str,
    ) -> Result<T, ServiceError> {
        let response = self.execute(operation, method, path, &[]).await?;
        let body = response.bytes().await.map_err(|error| {
            log::error!("{operation:?} response body could not be read: {error}");
            ServiceError::default_for(operation)
        })?;

        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(T::default());
        }

        serde_json::from_slice(&body).map_err(|error| {
            log::error!("{operation:?} response could not be decoded: {error}");
            ServiceError::default_for(operation)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> NotificationClient {
        NotificationClient::new(&ApiConfig {
            base_url: server.uri(),
            access_token: None,
            request_timeout_secs: 5,
        })
        .unwrap()
    }

    fn notification_json(id: i64, notification_type: &str, read: bool) -> serde_json::Value {
        json!({
            "id": id,
            "title": format!("Notification {id}"),
            "message": "Your booking was updated",
            "type": notification_type,
            "read": read,
            "createdAt": "2026-02-10T18:30:00Z"
        })
    }

    #[test]
    fn rejects_relative_base_urls() {
        let result = NotificationClient::new(&ApiConfig {
            base_url: "localhost/api".into(),
            ..ApiConfig::default()
        });
        assert!(matches!(result, Err(ClientError::InvalidBaseUrl { .. })));
    }

    #[tokio::test]
    async fn get_paged_sends_page_and_size() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/notifications/paged"))
            .and(query_param("page", "2"))
            .and(query_param("size", "10"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "notifications": [notification_json(21, "BOOKING", false)],
                "currentPage": 2,
                "totalItems": 21,
                "totalPages": 3
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let page = client_for(&mock_server).get_paged(2, 10).await.unwrap();

        assert_eq!(page.current_page, 2);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.notifications[0].id, 21);
        assert_eq!(page.notifications[0].notification_type, NotificationType::Booking);
    }

    #[tokio::test]
    async fn get_paged_never_requests_empty_pages() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/notifications/paged"))
            .and(query_param("size", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"notifications": []})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let page = client_for(&mock_server).get_paged(0, 0).await.unwrap();
        assert!(page.notifications.is_empty());
    }

    #[tokio::test]
    async fn list_endpoints_decode_arrays() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/notifications"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                notification_json(1, "PAYMENT", true),
                notification_json(2, "REMINDER", false)
            ])))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/notifications/unread"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([notification_json(2, "REMINDER", false)])),
            )
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        assert_eq!(client.get_all().await.unwrap().len(), 2);

        let unread = client.get_unread().await.unwrap();
        assert_eq!(unread.len(), 1);
        assert!(!unread[0].read);
    }

    #[tokio::test]
    async fn unread_count_decodes_count() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/notifications/unread/count"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"count": 4})))
            .mount(&mock_server)
            .await;

        let count = client_for(&mock_server).get_unread_count().await.unwrap();
        assert_eq!(count.count, 4);
    }

    #[tokio::test]
    async fn single_item_mutations_use_put_and_delete() {
        let mock_server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/notifications/12/read"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/api/notifications/12"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        client.mark_read(12).await.unwrap();
        client.delete(12).await.unwrap();
    }

    #[tokio::test]
    async fn bulk_mutations_report_optional_counters() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/notifications/read-all"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"markedCount": 3})))
            .mount(&mock_server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/api/notifications/read"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        assert_eq!(client.mark_all_read().await.unwrap().marked_count, Some(3));
        assert_eq!(client.delete_all_read().await.unwrap().deleted_count, None);
    }

    #[tokio::test]
    #[allow(deprecated)]
    async fn delete_all_forwards_to_delete_all_read() {
        let mock_server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/notifications/read"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"deletedCount": 2})))
            .expect(1)
            .mount(&mock_server)
            .await;

        client_for(&mock_server).delete_all().await.unwrap();
    }

    #[tokio::test]
    async fn type_endpoints_embed_type_and_read_flag() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/notifications/type/SHOW_UPDATE"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([notification_json(5, "SHOW_UPDATE", false)])),
            )
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/notifications/type/REFUND/read/false"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/notifications/type/REFUND/read/true/count"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"count": 6})))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let by_type = client.get_by_type(NotificationType::ShowUpdate).await.unwrap();
        assert_eq!(by_type[0].notification_type, NotificationType::ShowUpdate);

        let unread_refunds = client
            .get_by_type_and_read_status(NotificationType::Refund, false)
            .await
            .unwrap();
        assert!(unread_refunds.is_empty());

        let read_refunds = client
            .get_count_by_type_and_read_status(NotificationType::Refund, true)
            .await
            .unwrap();
        assert_eq!(read_refunds.count, 6);
    }

    #[tokio::test]
    async fn sends_bearer_token_when_configured() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/notifications/unread/count"))
            .and(header("Authorization", "Bearer s3cret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"count": 0})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = NotificationClient::new(&ApiConfig {
            base_url: format!("{}/", mock_server.uri()),
            access_token: Some("s3cret".into()),
            request_timeout_secs: 5,
        })
        .unwrap();

        assert_eq!(client.get_unread_count().await.unwrap().count, 0);
    }

    #[tokio::test]
    async fn failures_carry_server_message() {
        let mock_server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/notifications/99/read"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(json!({"message": "Notification not found"})),
            )
            .mount(&mock_server)
            .await;

        let error = client_for(&mock_server).mark_read(99).await.unwrap_err();
        assert_eq!(error.operation, Operation::MarkRead);
        assert_eq!(error.message, "Notification not found");
    }

    #[tokio::test]
    async fn failures_without_message_use_operation_default() {
        let mock_server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/notifications/read"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/notifications/unread/count"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let error = client.delete_all_read().await.unwrap_err();
        assert_eq!(error.message, "Failed to delete read notifications");

        let error = client.get_unread_count().await.unwrap_err();
        assert_eq!(error.message, "Failed to load unread notification count");
    }

    #[tokio::test]
    async fn transport_errors_use_operation_default() {
        let mock_server = MockServer::start().await;
        let client = client_for(&mock_server);
        drop(mock_server);

        let error = client.get_paged(0, 10).await.unwrap_err();
        assert_eq!(error.operation, Operation::GetPaged);
        assert_eq!(error.message, "Failed to load notifications");
    }
}
