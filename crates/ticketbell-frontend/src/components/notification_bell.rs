use gpui::{
    Context, Entity, EventEmitter, IntoElement, ParentElement, Render, Subscription, Task, Window,
    div,
};
use gpui_component::{
    IconName,
    badge::Badge,
    button::{Button, ButtonVariants},
};

use crate::{
    BackendBridge,
    entities::bell_entity::{BellEntity, POLL_INTERVAL},
    views::{NavigateTo, PageUi},
};

/// Bell button showing the unread notification count.
///
/// The count is fetched when the bell is created and then once per
/// [`POLL_INTERVAL`]. Dropping the view cancels the polling task.
pub struct NotificationBell {
    bell: Entity<BellEntity>,
    _poll_task: Task<()>,
    _subscription: Subscription,
}

impl NotificationBell {
    pub fn new(bell: Entity<BellEntity>, cx: &mut Context<Self>) -> Self {
        let _subscription = cx.observe(&bell, |_, _, cx| cx.notify());

        let request = bell.update(cx, |bell, cx| {
            cx.notify();
            bell.request_count()
        });
        BackendBridge::dispatch(request, cx);

        let polled = bell.clone();
        let bridge = cx.global::<BackendBridge>().clone();
        let _poll_task = cx.spawn(async move |this, cx| {
            loop {
                cx.background_executor().timer(POLL_INTERVAL).await;

                let attached = this.upgrade().is_some();
                let request = polled
                    .update(cx, |bell, cx| {
                        cx.notify();
                        bell.tick(attached)
                    })
                    .ok()
                    .flatten();

                if let Some(request) = request {
                    bridge.send(request).await;
                }
                if !attached {
                    log::debug!("Bell view is gone, stopping unread count polling");
                    break;
                }
            }
        });

        Self {
            bell,
            _poll_task,
            _subscription,
        }
    }
}

impl EventEmitter<NavigateTo> for NotificationBell {}

impl Render for NotificationBell {
    fn render(&mut self, _: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let bell = self.bell.read(cx);
        let tooltip = if bell.error.is_empty() {
            "Notifications".to_string()
        } else {
            bell.error.clone()
        };
        let count = usize::try_from(bell.unread_count).unwrap_or(usize::MAX);

        div().child(
            Badge::new().count(count).max(99).child(
                Button::new("notification-bell")
                    .ghost()
                    .icon(IconName::Bell)
                    .loading(bell.is_loading && bell.unread_count == 0)
                    .tooltip(tooltip)
                    .on_click(cx.listener(|_, _, _, cx| {
                        cx.emit(NavigateTo(PageUi::Notifications));
                    })),
            ),
        )
    }
}
