use gpui::{App, IntoElement, ParentElement, SharedString, Window, prelude::FluentBuilder};
use gpui_component::{Icon, tag::Tag};
use ticketbell_bridge::enums::{
    BadgeColor, ClosedEnum, DisplayMetadata, MetadataTable, display_name_from_metadata, lookup,
    parse,
};

use crate::components::icon_for;

/// Tag showing the label, colour and icon a metadata table assigns to a
/// status value.
///
/// Missing status or metadata renders an empty neutral tag. A status outside
/// the enum renders its raw text.
pub struct StatusBadge<T: ClosedEnum> {
    status: Option<SharedString>,
    metadata: Option<&'static MetadataTable<T>>,
}

impl<T: ClosedEnum> StatusBadge<T> {
    pub fn new(
        status: Option<impl Into<SharedString>>,
        metadata: Option<&'static MetadataTable<T>>,
    ) -> Self {
        Self {
            status: status.map(Into::into),
            metadata,
        }
    }

    pub fn for_member(member: T, metadata: &'static MetadataTable<T>) -> Self {
        Self::new(Some(member.value()), Some(metadata))
    }

    fn entry(&self) -> Option<&'static DisplayMetadata> {
        let table = self.metadata?;
        let member = parse::<T>(self.status.as_deref().map(|v| &**v))?;
        lookup(table, member)
    }

    pub fn display_name(&self) -> String {
        match (self.status.as_deref(), self.metadata) {
            (Some(status), Some(table)) => display_name_from_metadata(Some(status), Some(table)),
            _ => String::new(),
        }
    }

    pub fn color(&self) -> BadgeColor {
        self.entry().map(|entry| entry.color).unwrap_or_default()
    }

    pub fn icon(&self) -> &'static str {
        self.entry().map(|entry| entry.icon).unwrap_or("")
    }
}

fn tag_for(color: BadgeColor) -> Tag {
    match color {
        BadgeColor::Primary => Tag::primary(),
        BadgeColor::Secondary => Tag::secondary(),
        BadgeColor::Success => Tag::success(),
        BadgeColor::Info => Tag::info(),
        BadgeColor::Warning => Tag::warning(),
        BadgeColor::Danger => Tag::danger(),
    }
}

impl<T: ClosedEnum> IntoElement for StatusBadge<T> {
    type Element = gpui::Component<Self>;

    fn into_element(self) -> Self::Element {
        gpui::Component::new(self)
    }
}

impl<T: ClosedEnum> gpui::RenderOnce for StatusBadge<T> {
    fn render(self, _: &mut Window, _: &mut App) -> impl IntoElement {
        let icon = icon_for(self.icon());
        tag_for(self.color())
            .when_some(icon, |this, icon| this.child(Icon::new(icon)))
            .child(self.display_name())
    }
}
