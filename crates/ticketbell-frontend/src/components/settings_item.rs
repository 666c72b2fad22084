use gpui::{
    App, IntoElement, ParentElement, RenderOnce, SharedString, Styled, Window, div,
    prelude::FluentBuilder,
};
use gpui_component::{ActiveTheme, StyledExt};

/// One read-only configuration value: a name with an optional hint on the
/// left and the effective value on the right.
#[derive(IntoElement)]
pub struct SettingsItem {
    name: SharedString,
    value: SharedString,
    hint: Option<SharedString>,
    unset: bool,
}

impl SettingsItem {
    pub fn new(name: impl Into<SharedString>, value: impl Into<SharedString>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            hint: None,
            unset: false,
        }
    }

    /// Shows `fallback` in muted text when `value` is missing.
    pub fn optional(
        name: impl Into<SharedString>,
        value: Option<impl Into<SharedString>>,
        fallback: impl Into<SharedString>,
    ) -> Self {
        match value {
            Some(value) => Self::new(name, value),
            None => Self {
                unset: true,
                ..Self::new(name, fallback)
            },
        }
    }

    pub fn hint(mut self, hint: impl Into<SharedString>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl RenderOnce for SettingsItem {
    fn render(self, _: &mut Window, cx: &mut App) -> impl IntoElement {
        let muted = cx.theme().muted_foreground;

        div()
            .w_full()
            .py_2()
            .flex()
            .items_center()
            .justify_between()
            .gap_4()
            .child(
                div()
                    .flex()
                    .flex_col()
                    .child(div().child(self.name).font_semibold())
                    .when_some(self.hint, |this, hint| {
                        this.child(div().text_xs().text_color(muted).child(hint))
                    }),
            )
            .child(
                div()
                    .text_sm()
                    .when(self.unset, |this| this.text_color(muted))
                    .child(self.value),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_values_fall_back_and_are_marked_unset() {
        let item = SettingsItem::optional("Access token", None::<&str>, "Not set");
        assert_eq!(item.value.as_ref(), "Not set");
        assert!(item.unset);

        let item = SettingsItem::optional("Access token", Some("Configured"), "Not set");
        assert_eq!(item.value.as_ref(), "Configured");
        assert!(!item.unset);
        assert!(item.hint.is_none());
    }
}
