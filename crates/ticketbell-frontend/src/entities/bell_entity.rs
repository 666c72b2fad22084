use ticketbell_bridge::{
    MessageToBackend, error::ServiceError, notification::NotificationCount,
};

/// How often the bell re-fetches the unread count while it is shown.
pub const POLL_INTERVAL: std::time::Duration = std::time::Duration::from_secs(60);

/// Shown when the unread count cannot be fetched.
pub const COUNT_ERROR_MESSAGE: &str = "Failed to load notifications count";

/// Unread-count state behind the notification bell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BellEntity {
    pub unread_count: u64,
    pub is_loading: bool,
    /// Empty when the last fetch succeeded.
    pub error: String,
}

impl BellEntity {
    /// Starts a count refresh and returns the request to send.
    pub fn request_count(&mut self) -> MessageToBackend {
        self.is_loading = true;
        MessageToBackend::FetchUnreadCount
    }

    /// Applies the answer to [`MessageToBackend::FetchUnreadCount`]. A failure
    /// keeps the previous count on display.
    pub fn apply_count(&mut self, result: Result<NotificationCount, ServiceError>) {
        self.is_loading = false;
        match result {
            Ok(count) => {
                self.unread_count = count.count;
                self.error.clear();
            }
            Err(error) => {
                log::error!("Failed to refresh unread count: {error}");
                self.error = COUNT_ERROR_MESSAGE.to_string();
            }
        }
    }

    /// One poll tick. Only a bell whose view is still mounted (`attached`)
    /// re-fetches; otherwise the tick leaves the current count in place.
    pub fn tick(&mut self, attached: bool) -> Option<MessageToBackend> {
        attached.then(|| self.request_count())
    }
}

#[cfg(test)]
mod tests {
    use ticketbell_bridge::error::Operation;

    use super::*;

    #[test]
    fn successful_fetch_sets_count_and_clears_error() {
        let mut bell = BellEntity {
            error: COUNT_ERROR_MESSAGE.to_string(),
            ..BellEntity::default()
        };

        assert_eq!(bell.request_count(), MessageToBackend::FetchUnreadCount);
        assert!(bell.is_loading);

        bell.apply_count(Ok(NotificationCount { count: 3 }));

        assert_eq!(bell.unread_count, 3);
        assert!(!bell.is_loading);
        assert!(bell.error.is_empty());
    }

    #[test]
    fn failed_fetch_keeps_previous_count() {
        let mut bell = BellEntity {
            unread_count: 7,
            ..BellEntity::default()
        };
        bell.request_count();

        bell.apply_count(Err(ServiceError::default_for(Operation::GetUnreadCount)));

        assert_eq!(bell.unread_count, 7);
        assert!(!bell.is_loading);
        assert_eq!(bell.error, COUNT_ERROR_MESSAGE);
    }

    #[test]
    fn detached_ticks_do_not_fetch() {
        let mut bell = BellEntity {
            unread_count: 2,
            ..BellEntity::default()
        };

        assert_eq!(bell.tick(false), None);
        assert_eq!(bell.unread_count, 2);
        assert!(!bell.is_loading);

        assert_eq!(bell.tick(true), Some(MessageToBackend::FetchUnreadCount));
    }
}
