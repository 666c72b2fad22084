use gpui::{Context, IntoElement, ParentElement, Render, Styled, Window, div};
use gpui_component::{
    ActiveTheme, StyledExt,
    group_box::{GroupBox, GroupBoxVariants},
};

use crate::{components::settings_item::SettingsItem, entities::DataEntities};

/// Read-only view of the API settings the backend is using.
pub struct SettingsPage {
    data: DataEntities,
}

impl SettingsPage {
    pub fn new(data: &DataEntities, cx: &mut Context<Self>) -> Self {
        cx.observe(&data.settings, |_, _, cx| cx.notify()).detach();
        Self { data: data.clone() }
    }
}

impl Render for SettingsPage {
    fn render(&mut self, _: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let settings = self.data.settings.read(cx);
        let api = &settings.config.api;

        div()
            .size_full()
            .flex()
            .flex_col()
            .gap_6()
            .child(div().child("Settings").text_2xl().font_bold())
            .child(
                GroupBox::new()
                    .outline()
                    .child(div().child("Notifications API").text_xl().font_bold())
                    .child(
                        SettingsItem::new("Server", api.base_url.clone())
                            .hint("Base URL of the booking service"),
                    )
                    .child(
                        SettingsItem::optional(
                            "Access token",
                            api.access_token.as_ref().map(|_| "Configured"),
                            "Not set",
                        )
                        .hint("Sent as a bearer token"),
                    )
                    .child(SettingsItem::new(
                        "Request timeout",
                        format!("{} s", api.request_timeout_secs),
                    )),
            )
            .child(
                div()
                    .text_sm()
                    .text_color(cx.theme().muted_foreground)
                    .child(if settings.loaded {
                        "Edit config.toml in the application config directory to change these values."
                    } else {
                        "Loading settings..."
                    }),
            )
    }
}
