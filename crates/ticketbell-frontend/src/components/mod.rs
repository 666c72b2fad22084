use gpui_component::IconName;

pub mod enum_filter;
pub mod enum_select;
pub mod notification_bell;
pub mod settings_item;
pub mod status_badge;

/// Resolves a metadata icon tag to a bundled icon. Unknown and empty tags
/// render without an icon.
pub fn icon_for(tag: &str) -> Option<IconName> {
    let icon = match tag {
        "info" => IconName::Info,
        "check-circle" => IconName::CircleCheck,
        "calendar" => IconName::Calendar,
        "star" => IconName::Star,
        "bell" => IconName::Bell,
        "inbox" => IconName::Inbox,
        "arrow-left" => IconName::ArrowLeft,
        "x-circle" => IconName::CircleX,
        _ => return None,
    };
    Some(icon)
}
