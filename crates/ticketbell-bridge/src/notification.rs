//! Notification records as served by the booking backend.
//!
//! Decoding happens once, here: legacy snake_case fields are folded onto the
//! canonical camelCase ones, unknown types resolve to [`NotificationType::System`]
//! and unreadable timestamps become `None`. Everything downstream only ever
//! sees the canonical shape.

use std::borrow::Cow;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize, de::IgnoredAny};

use crate::enums::{BadgeColor, ClosedEnum, DisplayMetadata};

/// Category of a notification. Closed set, defined by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NotificationType {
    System,
    Booking,
    ShowUpdate,
    Promotion,
    Reminder,
    Payment,
    Refund,
    Cancellation,
}

impl ClosedEnum for NotificationType {
    const MEMBERS: &'static [Self] = &[
        NotificationType::System,
        NotificationType::Booking,
        NotificationType::ShowUpdate,
        NotificationType::Promotion,
        NotificationType::Reminder,
        NotificationType::Payment,
        NotificationType::Refund,
        NotificationType::Cancellation,
    ];

    fn name(self) -> &'static str {
        match self {
            NotificationType::System => "SYSTEM",
            NotificationType::Booking => "BOOKING",
            NotificationType::ShowUpdate => "SHOW_UPDATE",
            NotificationType::Promotion => "PROMOTION",
            NotificationType::Reminder => "REMINDER",
            NotificationType::Payment => "PAYMENT",
            NotificationType::Refund => "REFUND",
            NotificationType::Cancellation => "CANCELLATION",
        }
    }

    fn value(self) -> &'static str {
        self.name()
    }
}

impl NotificationType {
    /// Display attributes for this type.
    pub const fn metadata(self) -> DisplayMetadata {
        let (display_name, color, icon) = match self {
            NotificationType::System => ("System", BadgeColor::Secondary, "info"),
            NotificationType::Booking => ("Booking", BadgeColor::Primary, "check-circle"),
            NotificationType::ShowUpdate => ("Show Update", BadgeColor::Info, "calendar"),
            NotificationType::Promotion => ("Promotion", BadgeColor::Success, "star"),
            NotificationType::Reminder => ("Reminder", BadgeColor::Warning, "bell"),
            NotificationType::Payment => ("Payment", BadgeColor::Success, "inbox"),
            NotificationType::Refund => ("Refund", BadgeColor::Info, "arrow-left"),
            NotificationType::Cancellation => ("Cancellation", BadgeColor::Danger, "x-circle"),
        };

        DisplayMetadata {
            display_name: Cow::Borrowed(display_name),
            color,
            icon,
        }
    }
}

impl std::fmt::Display for NotificationType {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.value())
    }
}

impl Serialize for NotificationType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.value())
    }
}

impl<'de> Deserialize<'de> for NotificationType {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(notification_type_or_system(Some(&raw)))
    }
}

fn notification_type_or_system(raw: Option<&str>) -> NotificationType {
    match crate::enums::parse(raw) {
        Some(notification_type) => notification_type,
        None => {
            log::warn!("Unknown notification type {raw:?}, treating it as SYSTEM");
            NotificationType::System
        }
    }
}

/// Metadata for every [`NotificationType`], in declaration order.
pub static NOTIFICATION_TYPE_METADATA: [(NotificationType, DisplayMetadata); 8] = [
    (NotificationType::System, NotificationType::System.metadata()),
    (NotificationType::Booking, NotificationType::Booking.metadata()),
    (NotificationType::ShowUpdate, NotificationType::ShowUpdate.metadata()),
    (NotificationType::Promotion, NotificationType::Promotion.metadata()),
    (NotificationType::Reminder, NotificationType::Reminder.metadata()),
    (NotificationType::Payment, NotificationType::Payment.metadata()),
    (NotificationType::Refund, NotificationType::Refund.metadata()),
    (NotificationType::Cancellation, NotificationType::Cancellation.metadata()),
];

/// Metadata for a raw type string. Unknown strings get SYSTEM styling with
/// the raw string as display name.
pub fn get_notification_metadata(raw: &str) -> DisplayMetadata {
    match crate::enums::parse::<NotificationType>(Some(raw)) {
        Some(notification_type) => notification_type.metadata(),
        None => DisplayMetadata {
            display_name: Cow::Owned(raw.to_string()),
            ..NotificationType::System.metadata()
        },
    }
}

/// A single user-facing notification.
///
/// `read` is `true` exactly when `read_at` is set, as long as the record was
/// only changed through the client's own mutations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "NotificationWire", rename_all = "camelCase")]
pub struct Notification {
    pub id: i64,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    pub related_id: Option<i64>,
    pub related_type: Option<String>,
    pub read: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub read_at: Option<DateTime<Utc>>,
}

impl Notification {
    /// Marks the notification read at `at`, unless it already is.
    pub fn mark_read(&mut self, at: DateTime<Utc>) {
        if !self.read {
            self.read = true;
            self.read_at = Some(at);
        }
    }
}

/// Raw JSON shape, accepting both field spellings the backend has used.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NotificationWire {
    id: i64,
    title: Option<String>,
    message: Option<String>,
    #[serde(rename = "type")]
    notification_type: Option<String>,
    related_id: Option<i64>,
    related_type: Option<String>,
    read: Option<bool>,
    created_at: Option<RawTimestamp>,
    read_at: Option<RawTimestamp>,

    #[serde(rename = "is_read")]
    legacy_read: Option<bool>,
    #[serde(rename = "created_at")]
    legacy_created_at: Option<RawTimestamp>,
    #[serde(rename = "read_at")]
    legacy_read_at: Option<RawTimestamp>,
    #[serde(rename = "related_id")]
    legacy_related_id: Option<i64>,
    #[serde(rename = "related_type")]
    legacy_related_type: Option<String>,
}

impl From<NotificationWire> for Notification {
    fn from(wire: NotificationWire) -> Self {
        Self {
            id: wire.id,
            title: wire.title.unwrap_or_default(),
            message: wire.message.unwrap_or_default(),
            notification_type: notification_type_or_system(wire.notification_type.as_deref()),
            related_id: wire.related_id.or(wire.legacy_related_id),
            related_type: wire.related_type.or(wire.legacy_related_type),
            read: wire.read.or(wire.legacy_read).unwrap_or(false),
            created_at: wire
                .created_at
                .or(wire.legacy_created_at)
                .and_then(RawTimestamp::resolve),
            read_at: wire.read_at.or(wire.legacy_read_at).and_then(RawTimestamp::resolve),
        }
    }
}

/// Timestamp in any of the shapes Jackson emits: an ISO string, epoch
/// milliseconds, or a `LocalDateTime` component array
/// (`[year, month, day, hour, minute, second?, nanos?]`).
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Text(String),
    EpochMillis(i64),
    Components(Vec<i64>),
    Unreadable(IgnoredAny),
}

impl RawTimestamp {
    fn resolve(self) -> Option<DateTime<Utc>> {
        match self {
            RawTimestamp::Text(text) => parse_timestamp(Some(&text)),
            RawTimestamp::EpochMillis(millis) => {
                let timestamp = DateTime::from_timestamp_millis(millis);
                if timestamp.is_none() {
                    log::warn!("Ignoring out-of-range notification timestamp {millis}");
                }
                timestamp
            }
            RawTimestamp::Components(components) => {
                let timestamp = local_from_components(&components);
                if timestamp.is_none() {
                    log::warn!("Ignoring unreadable notification timestamp {components:?}");
                }
                timestamp
            }
            RawTimestamp::Unreadable(_) => {
                log::warn!("Ignoring notification timestamp of unexpected JSON type");
                None
            }
        }
    }
}

/// Builds a local timestamp from `[year, month, day, hour?, minute?,
/// second?, nanos?]`. Missing trailing components count as zero.
fn local_from_components(components: &[i64]) -> Option<DateTime<Utc>> {
    let part = |index: usize| -> Option<u32> {
        u32::try_from(components.get(index).copied().unwrap_or(0)).ok()
    };
    if components.len() < 3 {
        return None;
    }

    let year = i32::try_from(components[0]).ok()?;
    let naive = NaiveDate::from_ymd_opt(year, part(1)?, part(2)?)?
        .and_hms_nano_opt(part(3)?, part(4)?, part(5)?, part(6)?)?;
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|timestamp| timestamp.with_timezone(&Utc))
}

/// Parses an RFC 3339 timestamp, or a zone-less one interpreted as local
/// time. Anything else is dropped with a warning.
pub fn parse_timestamp(raw: Option<&str>) -> Option<DateTime<Utc>> {
    let raw = raw.map(str::trim).filter(|raw| !raw.is_empty())?;

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.with_timezone(&Utc));
    }

    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"));
    match naive {
        Ok(naive) => Local
            .from_local_datetime(&naive)
            .earliest()
            .map(|timestamp| timestamp.with_timezone(&Utc)),
        Err(_) => {
            log::warn!("Ignoring unreadable notification timestamp {raw:?}");
            None
        }
    }
}

/// One page of notifications plus pagination counters. Pages are 0-based.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPage {
    #[serde(alias = "content", default)]
    pub notifications: Vec<Notification>,
    #[serde(alias = "number", default)]
    pub current_page: u32,
    #[serde(alias = "totalElements", default)]
    pub total_items: u64,
    #[serde(default)]
    pub total_pages: u32,
}

/// Answer of the count endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationCount {
    pub count: u64,
}

/// Answer of the mark-all-read endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkAllReadResponse {
    pub marked_count: Option<u64>,
}

/// Answer of the delete-all-read endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteReadResponse {
    pub deleted_count: Option<u64>,
}
