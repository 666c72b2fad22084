//! State behind the notifications page.
//!
//! The entity holds one server page at a time. Type and text filters, as
//! well as the per-type counters, only ever look at that page. Every method
//! that needs the backend returns the [`MessageToBackend`] to send; the
//! matching `apply_*` method consumes the answer.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use ticketbell_bridge::{
    MessageToBackend,
    error::ServiceError,
    notification::{Notification, NotificationPage, NotificationType},
};

/// Number of notifications requested per page.
pub const PAGE_SIZE: u32 = 10;

/// Unread and total occurrences of one notification type on the loaded page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TypeCount {
    pub unread: usize,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    /// 0-based index of the loaded page.
    pub current_page: u32,
    pub page_size: u32,
    pub total_items: u64,
    pub total_pages: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            current_page: 0,
            page_size: PAGE_SIZE,
            total_items: 0,
            total_pages: 0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct NotificationListEntity {
    /// The loaded page, in server order.
    pub notifications: Vec<Notification>,
    /// `notifications` narrowed down by the active filters.
    pub filtered: Vec<Notification>,
    pub is_loading: bool,
    /// Empty unless the last load or bulk action failed.
    pub error: String,
    pub pagination: Pagination,
    pub selected_type: Option<NotificationType>,
    pub search_term: String,
    pub type_counts: HashMap<NotificationType, TypeCount>,
}

impl NotificationListEntity {
    /// Starts loading `page` and returns the request to send.
    pub fn load_page(&mut self, page: u32) -> MessageToBackend {
        self.is_loading = true;
        self.error.clear();
        MessageToBackend::FetchNotificationPage {
            page,
            size: self.pagination.page_size,
        }
    }

    /// Reloads the currently displayed page.
    pub fn reload(&mut self) -> MessageToBackend {
        self.load_page(self.pagination.current_page)
    }

    /// Applies the answer to a page request. A failure keeps whatever was
    /// displayed before.
    ///
    /// When the requested page no longer exists (because the list shrank)
    /// the last existing page is requested instead.
    pub fn apply_page(
        &mut self,
        result: Result<NotificationPage, ServiceError>,
    ) -> Option<MessageToBackend> {
        self.is_loading = false;
        let page = match result {
            Ok(page) => page,
            Err(error) => {
                log::error!("Failed to load notifications: {error}");
                self.error = error.message;
                return None;
            }
        };

        if page.notifications.is_empty()
            && page.total_pages > 0
            && page.current_page >= page.total_pages
        {
            return Some(self.load_page(page.total_pages - 1));
        }

        self.pagination.current_page = page.current_page;
        self.pagination.total_items = page.total_items;
        self.pagination.total_pages = page.total_pages;
        self.notifications = page.notifications;
        self.recompute_type_counts();
        self.apply_filters();
        None
    }

    /// Whether `notification` passes the type filter and the search term.
    /// The search is a case-insensitive substring match on title or message.
    pub fn matches_filters(&self, notification: &Notification) -> bool {
        let type_matches = self
            .selected_type
            .is_none_or(|selected| notification.notification_type == selected);
        if !type_matches {
            return false;
        }

        let term = self.search_term.trim().to_lowercase();
        term.is_empty()
            || notification.title.to_lowercase().contains(&term)
            || notification.message.to_lowercase().contains(&term)
    }

    /// Recomputes `filtered` from the loaded page.
    pub fn apply_filters(&mut self) {
        self.filtered = self
            .notifications
            .iter()
            .filter(|notification| self.matches_filters(notification))
            .cloned()
            .collect();
    }

    pub fn set_type_filter(&mut self, selected_type: Option<NotificationType>) {
        self.selected_type = selected_type;
        self.apply_filters();
    }

    pub fn set_search_term(&mut self, search_term: impl Into<String>) {
        self.search_term = search_term.into();
        self.apply_filters();
    }

    pub fn clear_filters(&mut self) {
        self.selected_type = None;
        self.search_term.clear();
        self.apply_filters();
    }

    /// Recounts unread and total notifications per type over the loaded page.
    pub fn recompute_type_counts(&mut self) {
        let mut counts: HashMap<NotificationType, TypeCount> = HashMap::new();
        for notification in &self.notifications {
            let count = counts.entry(notification.notification_type).or_default();
            count.total += 1;
            if !notification.read {
                count.unread += 1;
            }
        }
        self.type_counts = counts;
    }

    /// Total occurrences per type, as shown next to the type filter.
    pub fn total_counts(&self) -> HashMap<NotificationType, usize> {
        self.type_counts
            .iter()
            .map(|(notification_type, count)| (*notification_type, count.total))
            .collect()
    }

    pub fn find(&self, id: i64) -> Option<&Notification> {
        self.notifications
            .iter()
            .find(|notification| notification.id == id)
    }

    /// Requests marking `id` as read. Unknown and already-read notifications
    /// need no request.
    pub fn mark_as_read(&self, id: i64) -> Option<MessageToBackend> {
        match self.find(id) {
            Some(notification) if !notification.read => {
                Some(MessageToBackend::MarkNotificationRead(id))
            }
            _ => None,
        }
    }

    /// Applies the answer to a single mark-read request. Success updates the
    /// item in place without reloading; failure leaves it unread.
    pub fn apply_mark_read(&mut self, id: i64, result: Result<(), ServiceError>, now: DateTime<Utc>) {
        if let Err(error) = result {
            log::error!("Failed to mark notification {id} as read: {error}");
            return;
        }

        for notification in self
            .notifications
            .iter_mut()
            .chain(self.filtered.iter_mut())
            .filter(|notification| notification.id == id)
        {
            notification.mark_read(now);
        }
        self.recompute_type_counts();
    }

    /// Opening a notification marks it read when it is not yet. The caller
    /// then navigates to the bookings page, whatever the notification
    /// relates to.
    pub fn view_details(&self, id: i64) -> Option<MessageToBackend> {
        self.mark_as_read(id)
    }

    pub fn mark_all_as_read(&mut self) -> MessageToBackend {
        self.is_loading = true;
        MessageToBackend::MarkAllNotificationsRead
    }

    /// Applies the answer to mark-all-read. The server is the source of
    /// truth: on success the current page is reloaded rather than patched.
    pub fn apply_mark_all_read(
        &mut self,
        result: Result<Option<u64>, ServiceError>,
    ) -> Option<MessageToBackend> {
        match result {
            Ok(_) => Some(self.reload()),
            Err(error) => {
                log::error!("Failed to mark all notifications as read: {error}");
                self.error = error.message;
                self.is_loading = false;
                None
            }
        }
    }

    pub fn delete(&self, id: i64) -> MessageToBackend {
        MessageToBackend::DeleteNotification(id)
    }

    /// Applies the answer to a single delete. Success drops the item locally
    /// without reloading; failure changes nothing.
    pub fn apply_delete(&mut self, id: i64, result: Result<(), ServiceError>) {
        if let Err(error) = result {
            log::error!("Failed to delete notification {id}: {error}");
            return;
        }

        self.notifications.retain(|notification| notification.id != id);
        self.filtered.retain(|notification| notification.id != id);
        self.recompute_type_counts();
    }

    pub fn delete_all_read(&mut self) -> MessageToBackend {
        self.is_loading = true;
        MessageToBackend::DeleteReadNotifications
    }

    /// Applies the answer to delete-all-read. Like mark-all-read, success
    /// reloads the current page.
    pub fn apply_delete_all_read(
        &mut self,
        result: Result<Option<u64>, ServiceError>,
    ) -> Option<MessageToBackend> {
        match result {
            Ok(_) => Some(self.reload()),
            Err(error) => {
                log::error!("Failed to delete read notifications: {error}");
                self.error = error.message;
                self.is_loading = false;
                None
            }
        }
    }

    /// Loads `page` if it exists. Out-of-range pages are ignored.
    pub fn go_to_page(&mut self, page: i64) -> Option<MessageToBackend> {
        let page = u32::try_from(page).ok()?;
        (page < self.pagination.total_pages).then(|| self.load_page(page))
    }

    pub fn has_previous_page(&self) -> bool {
        self.pagination.current_page > 0
    }

    pub fn has_next_page(&self) -> bool {
        self.pagination.current_page + 1 < self.pagination.total_pages
    }

    pub fn unread_on_page(&self) -> usize {
        self.notifications
            .iter()
            .filter(|notification| !notification.read)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use ticketbell_bridge::error::Operation;

    use super::*;

    fn notification(id: i64, title: &str, notification_type: NotificationType) -> Notification {
        Notification {
            id,
            title: title.to_string(),
            message: format!("Details for {title}"),
            notification_type,
            related_id: None,
            related_type: None,
            read: false,
            created_at: None,
            read_at: None,
        }
    }

    fn page(notifications: Vec<Notification>, current_page: u32, total_pages: u32) -> NotificationPage {
        NotificationPage {
            total_items: notifications.len() as u64,
            notifications,
            current_page,
            total_pages,
        }
    }

    fn loaded(notifications: Vec<Notification>) -> NotificationListEntity {
        let mut list = NotificationListEntity::default();
        list.load_page(0);
        list.apply_page(Ok(page(notifications, 0, 3)));
        list
    }

    fn booking_and_refund() -> NotificationListEntity {
        loaded(vec![
            notification(1, "Seat Confirmed", NotificationType::Booking),
            notification(2, "Refund Issued", NotificationType::Refund),
        ])
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap()
    }

    #[test]
    fn load_page_requests_fixed_page_size() {
        let mut list = NotificationListEntity::default();
        assert_eq!(
            list.load_page(4),
            MessageToBackend::FetchNotificationPage { page: 4, size: 10 }
        );
        assert!(list.is_loading);
    }

    #[test]
    fn successful_load_stores_page_and_counts() {
        let list = booking_and_refund();

        assert!(!list.is_loading);
        assert_eq!(list.pagination.total_pages, 3);
        assert_eq!(list.filtered.len(), 2);
        assert_eq!(
            list.type_counts[&NotificationType::Refund],
            TypeCount { unread: 1, total: 1 }
        );
        assert!(!list.type_counts.contains_key(&NotificationType::Promotion));
    }

    #[test]
    fn failed_load_keeps_previous_data() {
        let mut list = booking_and_refund();
        list.load_page(1);

        let follow_up = list.apply_page(Err(ServiceError::new(
            Operation::GetPaged,
            Some("Service unavailable".into()),
        )));

        assert_eq!(follow_up, None);
        assert!(!list.is_loading);
        assert_eq!(list.error, "Service unavailable");
        assert_eq!(list.notifications.len(), 2);
        assert_eq!(list.pagination.current_page, 0);
    }

    #[test]
    fn vanished_page_falls_back_to_last_page() {
        let mut list = NotificationListEntity::default();
        list.load_page(3);

        let follow_up = list.apply_page(Ok(page(vec![], 3, 2)));

        assert_eq!(
            follow_up,
            Some(MessageToBackend::FetchNotificationPage { page: 1, size: 10 })
        );
        assert!(list.is_loading);
    }

    #[test]
    fn type_filter_keeps_matching_items_only() {
        let mut list = booking_and_refund();
        list.set_type_filter(Some(NotificationType::Refund));

        let ids: Vec<i64> = list.filtered.iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn search_matches_title_or_message_case_insensitively() {
        let mut list = booking_and_refund();
        list.set_search_term("confirmed");
        let ids: Vec<i64> = list.filtered.iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![1]);

        list.set_search_term("DETAILS FOR REFUND");
        let ids: Vec<i64> = list.filtered.iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn filters_combine_and_clear() {
        let mut list = booking_and_refund();
        list.set_type_filter(Some(NotificationType::Booking));
        list.set_search_term("refund");
        assert!(list.filtered.is_empty());

        list.clear_filters();
        assert_eq!(list.filtered.len(), 2);
    }

    #[test]
    fn out_of_range_pages_are_ignored() {
        let mut list = booking_and_refund();

        assert_eq!(list.go_to_page(-1), None);
        assert_eq!(list.go_to_page(3), None);
        assert!(!list.is_loading);

        assert_eq!(
            list.go_to_page(2),
            Some(MessageToBackend::FetchNotificationPage { page: 2, size: 10 })
        );
    }

    #[test]
    fn mark_as_read_skips_read_items() {
        let mut list = booking_and_refund();

        assert_eq!(list.mark_as_read(1), Some(MessageToBackend::MarkNotificationRead(1)));
        list.apply_mark_read(1, Ok(()), now());

        assert_eq!(list.mark_as_read(1), None);
        assert_eq!(list.view_details(1), None);
        assert_eq!(list.mark_as_read(404), None);
    }

    #[test]
    fn successful_mark_read_updates_both_lists() {
        let mut list = booking_and_refund();
        list.set_type_filter(Some(NotificationType::Booking));

        list.apply_mark_read(1, Ok(()), now());

        assert!(list.find(1).unwrap().read);
        assert_eq!(list.find(1).unwrap().read_at, Some(now()));
        assert!(list.filtered[0].read);
        assert_eq!(list.type_counts[&NotificationType::Booking].unread, 0);
        assert_eq!(list.unread_on_page(), 1);
    }

    #[test]
    fn failed_mark_read_leaves_item_unread() {
        let mut list = booking_and_refund();

        list.apply_mark_read(1, Err(ServiceError::default_for(Operation::MarkRead)), now());

        assert!(!list.find(1).unwrap().read);
        assert!(list.error.is_empty());
    }

    #[test]
    fn delete_removes_item_and_recounts() {
        let mut list = booking_and_refund();
        assert_eq!(list.delete(2), MessageToBackend::DeleteNotification(2));

        list.apply_delete(2, Ok(()));

        assert!(list.find(2).is_none());
        assert_eq!(list.filtered.len(), 1);
        assert!(!list.type_counts.contains_key(&NotificationType::Refund));
    }

    #[test]
    fn failed_delete_changes_nothing() {
        let mut list = booking_and_refund();

        list.apply_delete(2, Err(ServiceError::default_for(Operation::Delete)));

        assert_eq!(list.notifications.len(), 2);
        assert!(list.error.is_empty());
    }

    #[test]
    fn bulk_actions_reload_current_page_on_success() {
        let mut list = booking_and_refund();
        list.go_to_page(1);
        list.apply_page(Ok(page(vec![notification(11, "Doors open", NotificationType::ShowUpdate)], 1, 3)));

        assert_eq!(list.mark_all_as_read(), MessageToBackend::MarkAllNotificationsRead);
        assert!(list.is_loading);
        assert_eq!(
            list.apply_mark_all_read(Ok(Some(1))),
            Some(MessageToBackend::FetchNotificationPage { page: 1, size: 10 })
        );
        assert!(list.is_loading);
        assert!(!list.find(11).unwrap().read);

        assert_eq!(list.delete_all_read(), MessageToBackend::DeleteReadNotifications);
        assert_eq!(
            list.apply_delete_all_read(Ok(None)),
            Some(MessageToBackend::FetchNotificationPage { page: 1, size: 10 })
        );
    }

    #[test]
    fn bulk_action_failures_surface_an_error() {
        let mut list = booking_and_refund();

        list.mark_all_as_read();
        assert_eq!(
            list.apply_mark_all_read(Err(ServiceError::default_for(Operation::MarkAllRead))),
            None
        );
        assert!(!list.is_loading);
        assert_eq!(list.error, "Failed to mark all notifications as read");

        list.delete_all_read();
        assert_eq!(
            list.apply_delete_all_read(Err(ServiceError::default_for(Operation::DeleteAllRead))),
            None
        );
        assert_eq!(list.error, "Failed to delete read notifications");
        assert_eq!(list.notifications.len(), 2);
    }

    #[test]
    fn page_navigation_helpers_follow_bounds() {
        let list = booking_and_refund();
        assert!(!list.has_previous_page());
        assert!(list.has_next_page());
    }
}
