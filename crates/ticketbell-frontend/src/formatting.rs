use chrono::{DateTime, Local, Utc};

/// Formats a timestamp in the local time zone with the fixed English pattern
/// `%b %-d, %Y, %-I:%M %p`, e.g. `Mar 1, 2026, 6:30 PM`. The system locale is
/// not consulted. Missing timestamps render as an empty string.
pub fn format_date(timestamp: Option<DateTime<Utc>>) -> String {
    match timestamp {
        Some(timestamp) => timestamp
            .with_timezone(&Local)
            .format("%b %-d, %Y, %-I:%M %p")
            .to_string(),
        None => String::new(),
    }
}

fn plural(amount: i64, unit: &str) -> String {
    if amount == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{amount} {unit}s ago")
    }
}

/// Formats the time elapsed between `timestamp` and `now` in the largest
/// whole unit (days, hours or minutes). Anything under a minute, including
/// timestamps slightly in the future, is "Just now". Missing timestamps
/// render as an empty string.
pub fn format_elapsed(timestamp: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(timestamp) = timestamp else {
        return String::new();
    };

    let elapsed = now.signed_duration_since(timestamp);
    let days = elapsed.num_days();
    let hours = elapsed.num_hours();
    let minutes = elapsed.num_minutes();

    if days > 0 {
        plural(days, "day")
    } else if hours > 0 {
        plural(hours, "hour")
    } else if minutes > 0 {
        plural(minutes, "minute")
    } else {
        "Just now".to_string()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap()
    }

    #[test]
    fn elapsed_uses_the_largest_whole_unit() {
        assert_eq!(format_elapsed(Some(now() - Duration::seconds(90)), now()), "1 minute ago");
        assert_eq!(format_elapsed(Some(now() - Duration::minutes(45)), now()), "45 minutes ago");
        assert_eq!(format_elapsed(Some(now() - Duration::hours(2)), now()), "2 hours ago");
        assert_eq!(format_elapsed(Some(now() - Duration::hours(25)), now()), "1 day ago");
        assert_eq!(format_elapsed(Some(now() - Duration::days(9)), now()), "9 days ago");
    }

    #[test]
    fn elapsed_under_a_minute_is_just_now() {
        assert_eq!(format_elapsed(Some(now()), now()), "Just now");
        assert_eq!(format_elapsed(Some(now() - Duration::seconds(59)), now()), "Just now");
        assert_eq!(format_elapsed(Some(now() + Duration::minutes(5)), now()), "Just now");
    }

    #[test]
    fn missing_timestamps_render_empty() {
        assert_eq!(format_elapsed(None, now()), "");
        assert_eq!(format_date(None), "");
    }

    #[test]
    fn absolute_dates_include_the_year() {
        let formatted = format_date(Some(Utc.with_ymd_and_hms(2026, 3, 14, 12, 0, 0).unwrap()));
        assert!(formatted.contains("2026"), "{formatted}");
        assert!(formatted.starts_with("Mar"), "{formatted}");
    }

    #[test]
    fn absolute_dates_use_the_fixed_twelve_hour_pattern() {
        let evening = Local
            .with_ymd_and_hms(2026, 3, 1, 18, 30, 0)
            .earliest()
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(format_date(Some(evening)), "Mar 1, 2026, 6:30 PM");

        let morning = Local
            .with_ymd_and_hms(2026, 11, 20, 9, 5, 0)
            .earliest()
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(format_date(Some(morning)), "Nov 20, 2026, 9:05 AM");
    }
}
