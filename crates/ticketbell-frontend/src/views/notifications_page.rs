use chrono::{DateTime, Utc};
use gpui::{
    AppContext, Context, Entity, EventEmitter, InteractiveElement, IntoElement, ParentElement,
    Render, SharedString, StatefulInteractiveElement, Styled, Subscription, Window, div,
    prelude::FluentBuilder,
};
use gpui_component::{
    ActiveTheme, Disableable, IconName, Sizable, StyledExt,
    button::{Button, ButtonVariants},
    input::{Input, InputEvent, InputState},
};
use ticketbell_bridge::{
    MessageToBackend,
    notification::{NOTIFICATION_TYPE_METADATA, Notification, NotificationType},
};

use crate::{
    BackendBridge,
    components::{
        enum_filter::EnumFilter,
        enum_select::{EnumSelect, EnumSelectEvent},
        status_badge::StatusBadge,
    },
    entities::{
        DataEntities, bell_entity::BellEntity, notification_list_entity::NotificationListEntity,
    },
    formatting::{format_date, format_elapsed},
    views::{NavigateTo, PageUi},
};

/// Mark-all-read acts on every unread notification on the server, so it
/// follows the bell's count rather than the loaded page.
fn can_mark_all_read(is_loading: bool, server_unread: u64) -> bool {
    !is_loading && server_unread > 0
}

pub struct NotificationsPage {
    notifications: Entity<NotificationListEntity>,
    bell: Entity<BellEntity>,
    search: Entity<InputState>,
    type_select: Entity<EnumSelect<NotificationType>>,
    _subscriptions: Vec<Subscription>,
}

impl NotificationsPage {
    pub fn new(data: &DataEntities, window: &mut Window, cx: &mut Context<Self>) -> Self {
        let notifications = data.notifications.clone();
        let bell = data.bell.clone();
        let (selected_type, search_term) = {
            let list = notifications.read(cx);
            (list.selected_type, list.search_term.clone())
        };

        let search = cx.new(|cx| {
            InputState::new(window, cx)
                .placeholder("Search notifications...")
                .default_value(search_term)
        });
        let type_select = cx.new(|cx| {
            EnumSelect::new(selected_type, Some(&NOTIFICATION_TYPE_METADATA), window, cx)
                .placeholder("Filter by type")
        });

        let _subscriptions = vec![
            cx.observe(&notifications, |_, _, cx| cx.notify()),
            cx.observe(&bell, |_, _, cx| cx.notify()),
            cx.subscribe_in(&search, window, |this, state, event: &InputEvent, _, cx| {
                if let InputEvent::Change { .. } = event {
                    let term = state.read(cx).value().to_string();
                    this.notifications.update(cx, |list, cx| {
                        list.set_search_term(term);
                        cx.notify();
                    });
                }
            }),
            cx.subscribe_in(
                &type_select,
                window,
                |this, _, event: &EnumSelectEvent<NotificationType>, window, cx| {
                    let EnumSelectEvent::Change(value) = *event;
                    this.select_type(value, window, cx);
                },
            ),
        ];

        let page = Self {
            notifications,
            bell,
            search,
            type_select,
            _subscriptions,
        };
        page.update_list(cx, |list| Some(list.load_page(0)));
        page
    }

    /// Applies `change` to the list and sends the request it returns.
    fn update_list(
        &self,
        cx: &mut Context<Self>,
        change: impl FnOnce(&mut NotificationListEntity) -> Option<MessageToBackend>,
    ) {
        let request = self.notifications.update(cx, |list, cx| {
            let request = change(list);
            cx.notify();
            request
        });
        if let Some(request) = request {
            BackendBridge::dispatch(request, cx);
        }
    }

    fn select_type(
        &mut self,
        value: Option<NotificationType>,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        self.update_list(cx, |list| {
            list.set_type_filter(value);
            None
        });
        self.type_select.update(cx, |select, cx| {
            select.set_value(value, window, cx);
        });
    }

    fn clear_filters(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        self.search.update(cx, |state, cx| {
            state.set_value("", window, cx);
        });
        self.update_list(cx, |list| {
            list.clear_filters();
            None
        });
        self.type_select.update(cx, |select, cx| {
            select.set_value(None, window, cx);
        });
    }

    fn view_details(&mut self, id: i64, cx: &mut Context<Self>) {
        self.update_list(cx, |list| list.view_details(id));
        cx.emit(NavigateTo(PageUi::MyBookings));
    }

    fn render_item(
        &self,
        notification: &Notification,
        now: DateTime<Utc>,
        cx: &mut Context<Self>,
    ) -> impl IntoElement {
        let id = notification.id;
        let read = notification.read;
        let theme = cx.theme();
        let (border, accent, muted) = (theme.border, theme.accent, theme.muted_foreground);

        let elapsed = format_elapsed(notification.created_at, now);
        let absolute = format_date(notification.created_at);
        let timestamp = if elapsed.is_empty() {
            absolute
        } else {
            format!("{elapsed} · {absolute}")
        };

        div()
            .id(SharedString::from(format!("notification-{id}")))
            .w_full()
            .flex()
            .items_start()
            .gap_3()
            .p_3()
            .rounded_md()
            .border_1()
            .border_color(border)
            .cursor_pointer()
            .when(!read, |this| this.bg(accent))
            .on_click(cx.listener(move |this, _, _, cx| this.view_details(id, cx)))
            .child(StatusBadge::for_member(
                notification.notification_type,
                &NOTIFICATION_TYPE_METADATA,
            ))
            .child(
                div()
                    .flex_1()
                    .flex()
                    .flex_col()
                    .gap_1()
                    .child(
                        div()
                            .child(notification.title.clone())
                            .when(!read, |this| this.font_bold()),
                    )
                    .child(div().text_sm().child(notification.message.clone()))
                    .child(div().text_xs().text_color(muted).child(timestamp)),
            )
            .child(
                div()
                    .flex()
                    .gap_1()
                    .when(!read, |this| {
                        this.child(
                            Button::new(SharedString::from(format!("mark-read-{id}")))
                                .ghost()
                                .small()
                                .icon(IconName::Check)
                                .tooltip("Mark as read")
                                .on_click(cx.listener(move |this, _, _, cx| {
                                    cx.stop_propagation();
                                    this.update_list(cx, |list| list.mark_as_read(id));
                                })),
                        )
                    })
                    .child(
                        Button::new(SharedString::from(format!("delete-{id}")))
                            .ghost()
                            .small()
                            .icon(IconName::Delete)
                            .tooltip("Delete")
                            .on_click(cx.listener(move |this, _, _, cx| {
                                cx.stop_propagation();
                                this.update_list(cx, |list| Some(list.delete(id)));
                            })),
                    ),
            )
    }
}

impl EventEmitter<NavigateTo> for NotificationsPage {}

impl Render for NotificationsPage {
    fn render(&mut self, _: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let list = self.notifications.read(cx).clone();
        let server_unread = self.bell.read(cx).unread_count;
        let muted = cx.theme().muted_foreground;
        let danger = cx.theme().danger;
        let now = Utc::now();
        let filters_active = list.selected_type.is_some() || !list.search_term.trim().is_empty();
        let page = cx.entity().downgrade();

        let items: Vec<_> = list
            .filtered
            .iter()
            .map(|notification| self.render_item(notification, now, cx).into_any_element())
            .collect();

        div()
            .size_full()
            .flex()
            .flex_col()
            .gap_4()
            .child(
                div()
                    .flex()
                    .items_center()
                    .justify_between()
                    .child(
                        div()
                            .flex()
                            .flex_col()
                            .child(div().child("Notifications").text_2xl().font_bold())
                            .child(
                                div()
                                    .text_sm()
                                    .text_color(muted)
                                    .child(format!(
                                        "{} unread on this page",
                                        list.unread_on_page()
                                    )),
                            ),
                    )
                    .child(
                        div()
                            .flex()
                            .gap_2()
                            .child(
                                Button::new("mark-all-read")
                                    .primary()
                                    .icon(IconName::Check)
                                    .label("Mark all as read")
                                    .loading(list.is_loading)
                                    .disabled(!can_mark_all_read(list.is_loading, server_unread))
                                    .on_click(cx.listener(|this, _, _, cx| {
                                        this.update_list(cx, |list| Some(list.mark_all_as_read()));
                                    })),
                            )
                            .child(
                                Button::new("delete-read")
                                    .outline()
                                    .icon(IconName::Delete)
                                    .label("Delete read")
                                    .disabled(list.is_loading)
                                    .on_click(cx.listener(|this, _, _, cx| {
                                        this.update_list(cx, |list| Some(list.delete_all_read()));
                                    })),
                            ),
                    ),
            )
            .child(
                div()
                    .flex()
                    .items_center()
                    .gap_3()
                    .child(div().flex_1().child(Input::new(&self.search)))
                    .child(self.type_select.clone())
                    .when(filters_active, |this| {
                        this.child(
                            Button::new("clear-filters")
                                .ghost()
                                .label("Clear")
                                .on_click(cx.listener(|this, _, window, cx| {
                                    this.clear_filters(window, cx);
                                })),
                        )
                    }),
            )
            .child(
                EnumFilter::new("type-filter", list.selected_type)
                    .metadata(&NOTIFICATION_TYPE_METADATA)
                    .counts(list.total_counts())
                    .hide_empty(true)
                    .on_select(move |value, window, cx| {
                        let _ = page.update(cx, |this, cx| this.select_type(value, window, cx));
                    }),
            )
            .when(!list.error.is_empty(), |this| {
                this.child(
                    div()
                        .flex()
                        .items_center()
                        .gap_3()
                        .text_color(danger)
                        .child(list.error.clone())
                        .child(
                            Button::new("retry")
                                .small()
                                .outline()
                                .label("Retry")
                                .on_click(cx.listener(|this, _, _, cx| {
                                    this.update_list(cx, |list| Some(list.reload()));
                                })),
                        ),
                )
            })
            .child(
                div()
                    .flex()
                    .flex_col()
                    .gap_2()
                    .when(items.is_empty(), |this| {
                        let placeholder = if list.is_loading {
                            "Loading notifications..."
                        } else if filters_active {
                            "No notifications match your filters."
                        } else {
                            "You have no notifications."
                        };
                        this.child(div().py_8().text_color(muted).child(placeholder))
                    })
                    .children(items),
            )
            .when(list.pagination.total_pages > 1, |this| {
                let current = list.pagination.current_page;
                this.child(
                    div()
                        .flex()
                        .items_center()
                        .justify_center()
                        .gap_3()
                        .child(
                            Button::new("previous-page")
                                .small()
                                .outline()
                                .icon(IconName::ChevronLeft)
                                .disabled(list.is_loading || !list.has_previous_page())
                                .on_click(cx.listener(move |this, _, _, cx| {
                                    let previous = i64::from(current) - 1;
                                    this.update_list(cx, |list| list.go_to_page(previous));
                                })),
                        )
                        .child(
                            div().text_sm().child(format!(
                                "Page {} of {} ({} total)",
                                current + 1,
                                list.pagination.total_pages,
                                list.pagination.total_items
                            )),
                        )
                        .child(
                            Button::new("next-page")
                                .small()
                                .outline()
                                .icon(IconName::ChevronRight)
                                .disabled(list.is_loading || !list.has_next_page())
                                .on_click(cx.listener(move |this, _, _, cx| {
                                    let next = i64::from(current) + 1;
                                    this.update_list(cx, |list| list.go_to_page(next));
                                })),
                        ),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mark_all_read_follows_the_server_wide_count() {
        // Page 2 may be fully read while earlier pages still hold unread items.
        assert!(can_mark_all_read(false, 4));
        assert!(!can_mark_all_read(false, 0));
        assert!(!can_mark_all_read(true, 4));
    }
}
