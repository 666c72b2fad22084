mod bookings_page;
mod notifications_page;
mod settings_page;

use gpui::{
    AnyView, AppContext, Context, Entity, IntoElement, ParentElement, Render, Styled, Subscription,
    Window, div,
};
use gpui_component::{
    IconName, Root, Side, StyledExt,
    sidebar::{Sidebar, SidebarGroup, SidebarHeader, SidebarMenu, SidebarMenuItem},
};

use crate::{
    components::notification_bell::NotificationBell,
    entities::DataEntities,
    views::{
        bookings_page::BookingsPage, notifications_page::NotificationsPage,
        settings_page::SettingsPage,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageUi {
    MyBookings,
    Notifications,
    Settings,
}

/// Emitted by views asking the shell to switch pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigateTo(pub PageUi);

pub struct FrontendUi {
    data: DataEntities,
    bell: Entity<NotificationBell>,
    active_page: PageUi,
    active_page_view: AnyView,
    _bell_subscription: Subscription,
    page_subscription: Option<Subscription>,
}

impl FrontendUi {
    pub fn new(data: &DataEntities, window: &mut Window, cx: &mut Context<Self>) -> Self {
        let bell = cx.new(|cx| NotificationBell::new(data.bell.clone(), cx));
        let _bell_subscription =
            cx.subscribe_in(&bell, window, |this, _, event: &NavigateTo, window, cx| {
                this.change_page(event.0, window, cx);
            });

        let initial_view = cx.new(|_| BookingsPage::new()).into();
        Self {
            data: data.clone(),
            bell,
            active_page: PageUi::MyBookings,
            active_page_view: initial_view,
            _bell_subscription,
            page_subscription: None,
        }
    }

    pub fn change_page(&mut self, page: PageUi, window: &mut Window, cx: &mut Context<Self>) {
        log::debug!("Switching to {page:?}");
        self.page_subscription = None;

        let new_page = match page {
            PageUi::MyBookings => cx.new(|_| BookingsPage::new()).into(),
            PageUi::Notifications => {
                let view = cx.new(|cx| NotificationsPage::new(&self.data, window, cx));
                let subscription =
                    cx.subscribe_in(&view, window, |this, _, event: &NavigateTo, window, cx| {
                        this.change_page(event.0, window, cx);
                    });
                self.page_subscription = Some(subscription);
                view.into()
            }
            PageUi::Settings => cx.new(|cx| SettingsPage::new(&self.data, cx)).into(),
        };
        self.active_page = page;
        self.active_page_view = new_page;
        cx.notify();
    }
}

impl Render for FrontendUi {
    fn render(&mut self, window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let notification_layer = Root::render_notification_layer(window, cx);
        let on_page_change = |page| {
            cx.listener(move |this, _, window, cx| {
                this.change_page(page, window, cx);
            })
        };

        div()
            .flex()
            .size_full()
            .child(
                Sidebar::new(Side::Left)
                    .header(
                        SidebarHeader::new().child(
                            div()
                                .w_full()
                                .flex()
                                .items_center()
                                .justify_between()
                                .child(div().child("ticketbell").font_bold())
                                .child(self.bell.clone()),
                        ),
                    )
                    .child(
                        SidebarGroup::new("Navigation").child(
                            SidebarMenu::new()
                                .child(
                                    SidebarMenuItem::new("My bookings")
                                        .active(self.active_page == PageUi::MyBookings)
                                        .icon(IconName::Calendar)
                                        .on_click(on_page_change(PageUi::MyBookings)),
                                )
                                .child(
                                    SidebarMenuItem::new("Notifications")
                                        .active(self.active_page == PageUi::Notifications)
                                        .icon(IconName::Bell)
                                        .on_click(on_page_change(PageUi::Notifications)),
                                )
                                .child(
                                    SidebarMenuItem::new("Settings")
                                        .active(self.active_page == PageUi::Settings)
                                        .icon(IconName::Settings)
                                        .on_click(on_page_change(PageUi::Settings)),
                                ),
                        ),
                    ),
            )
            .child(div().p_5().size_full().child(self.active_page_view.clone()))
            .children(notification_layer)
    }
}
