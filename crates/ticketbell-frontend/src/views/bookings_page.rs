use gpui::{Context, IntoElement, ParentElement, Render, Styled, Window, div};
use gpui_component::{ActiveTheme, StyledExt};

/// Landing page, also the destination of "view details" on a notification.
#[derive(Default)]
pub struct BookingsPage;

impl BookingsPage {
    pub fn new() -> Self {
        Self
    }
}

impl Render for BookingsPage {
    fn render(&mut self, _: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        div()
            .flex()
            .flex_col()
            .gap_3()
            .child(div().child("My bookings").text_2xl().font_bold())
            .child(
                div()
                    .text_sm()
                    .text_color(cx.theme().muted_foreground)
                    .child("Your upcoming and past bookings appear here."),
            )
    }
}
