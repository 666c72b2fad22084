//! Helpers shared by every closed enumeration exposed to the user interface.
//!
//! Values coming from the network or from widgets arrive as raw strings. The
//! functions here resolve them against a [`ClosedEnum`] without ever failing:
//! absence or garbage resolves to a caller-chosen fallback, and display names
//! degrade to the raw input instead of erroring.

use std::borrow::Cow;

/// An enumeration with a fixed, declaration-ordered set of members.
///
/// Every member has a declared `name` (upper snake case, e.g. `SHOW_UPDATE`)
/// and a wire `value`. For most enums the two are identical, but lookups
/// treat them as separate keys.
pub trait ClosedEnum: Copy + Eq + std::hash::Hash + std::fmt::Debug + 'static {
    /// All members, in declaration order.
    const MEMBERS: &'static [Self];

    /// Declared member name.
    fn name(self) -> &'static str;

    /// Value used on the wire.
    fn value(self) -> &'static str;
}

/// Neutral colour tags understood by the badge components.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum BadgeColor {
    Primary,
    #[default]
    Secondary,
    Success,
    Info,
    Warning,
    Danger,
}

impl BadgeColor {
    pub fn as_str(self) -> &'static str {
        match self {
            BadgeColor::Primary => "primary",
            BadgeColor::Secondary => "secondary",
            BadgeColor::Success => "success",
            BadgeColor::Info => "info",
            BadgeColor::Warning => "warning",
            BadgeColor::Danger => "danger",
        }
    }
}

/// Display attributes attached to one enum member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayMetadata {
    pub display_name: Cow<'static, str>,
    pub color: BadgeColor,
    /// Icon tag, empty when the member has no icon.
    pub icon: &'static str,
}

/// A metadata table keyed by enum member.
pub type MetadataTable<T> = [(T, DisplayMetadata)];

/// Finds the metadata entry for `member`, if the table has one.
pub fn lookup<T: ClosedEnum>(table: &MetadataTable<T>, member: T) -> Option<&DisplayMetadata> {
    table
        .iter()
        .find(|(key, _)| *key == member)
        .map(|(_, metadata)| metadata)
}

/// Returns every member in declaration order.
pub fn values<T: ClosedEnum>() -> &'static [T] {
    T::MEMBERS
}

/// Returns every member name in declaration order.
pub fn keys<T: ClosedEnum>() -> Vec<&'static str> {
    T::MEMBERS.iter().map(|member| member.name()).collect()
}

/// Resolves `input` to a member: names are tried first, then values, both
/// case-insensitively. Empty or missing input resolves to `None`.
pub fn parse<T: ClosedEnum>(input: Option<&str>) -> Option<T> {
    let input = input.filter(|input| !input.is_empty())?;

    T::MEMBERS
        .iter()
        .find(|member| member.name().eq_ignore_ascii_case(input))
        .or_else(|| {
            T::MEMBERS
                .iter()
                .find(|member| member.value().eq_ignore_ascii_case(input))
        })
        .copied()
}

/// Like [`parse`], but returns `fallback` when nothing matches.
pub fn from_string<T: ClosedEnum>(input: Option<&str>, fallback: T) -> T {
    parse(input).unwrap_or(fallback)
}

/// Returns `true` when `input` names (or carries the value of) a real member.
pub fn is_valid_enum<T: ClosedEnum>(input: Option<&str>) -> bool {
    parse::<T>(input).is_some()
}

/// Converts an upper snake case name into title case (`SHOW_UPDATE` becomes
/// `Show Update`).
pub fn title_case(name: &str) -> String {
    name.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Derives a display name from the member whose *name* equals `value`
/// exactly. Returns `value` untouched when no member has that name.
pub fn display_name<T: ClosedEnum>(value: &str) -> String {
    match T::MEMBERS.iter().find(|member| member.name() == value) {
        Some(member) => title_case(member.name()),
        None => value.to_string(),
    }
}

/// Derives a display name, preferring the metadata table.
///
/// Missing input yields an empty string. Input that resolves to no member is
/// returned as-is.
pub fn display_name_from_metadata<T: ClosedEnum>(
    value: Option<&str>,
    metadata: Option<&MetadataTable<T>>,
) -> String {
    let Some(raw) = value else {
        return String::new();
    };

    match parse::<T>(Some(raw)) {
        Some(member) => metadata
            .and_then(|table| lookup(table, member))
            .map(|entry| entry.display_name.to_string())
            .unwrap_or_else(|| display_name::<T>(member.name())),
        None => raw.to_string(),
    }
}
