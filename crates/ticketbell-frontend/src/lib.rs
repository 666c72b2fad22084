use chrono::Utc;
use gpui::{App, AppContext, Application, AsyncApp, Global, WindowOptions};
use gpui_component::{
    Root, WindowExt,
    notification::{Notification as ToastNotification, NotificationType as ToastType},
};
use ticketbell_bridge::{MessageFromBackend, MessageToBackend, toast::ToastKind};
use tokio::sync::mpsc;

use crate::entities::{
    DataEntities, bell_entity::BellEntity, notification_list_entity::NotificationListEntity,
    settings_entity::SettingsEntity,
};

pub mod components;
pub mod entities;
pub mod formatting;
mod views;

#[derive(Clone)]
pub struct BackendBridge {
    pub to_backend: mpsc::Sender<MessageToBackend>,
}

impl BackendBridge {
    pub async fn send(&self, message: MessageToBackend) {
        if let Err(error) = self.to_backend.send(message).await {
            log::error!("Failed to send message to backend: {error}");
        }
    }

    /// Sends `message` through the global bridge without blocking the caller.
    pub fn dispatch(message: MessageToBackend, cx: &App) {
        let bridge = cx.global::<BackendBridge>().clone();
        cx.background_spawn(async move { bridge.send(message).await })
            .detach();
    }
}

impl Global for BackendBridge {}

fn toast_type(kind: ToastKind) -> ToastType {
    match kind {
        ToastKind::Info => ToastType::Info,
        ToastKind::Success => ToastType::Success,
        ToastKind::Warning => ToastType::Warning,
        ToastKind::Error => ToastType::Error,
    }
}

fn refresh_unread_count(data: &DataEntities, cx: &mut AsyncApp) -> Option<MessageToBackend> {
    data.bell
        .update(cx, |bell, cx| {
            cx.notify();
            bell.request_count()
        })
        .ok()
}

fn update_list(
    data: &DataEntities,
    cx: &mut AsyncApp,
    change: impl FnOnce(&mut NotificationListEntity) -> Option<MessageToBackend>,
) -> Option<MessageToBackend> {
    data.notifications
        .update(cx, |list, cx| {
            let request = change(list);
            cx.notify();
            request
        })
        .ok()
        .flatten()
}

/// Applies one backend answer to the view state and returns the follow-up
/// requests it calls for. Toasts are handled by the caller.
fn apply_backend_message(
    data: &DataEntities,
    message: MessageFromBackend,
    cx: &mut AsyncApp,
) -> Vec<MessageToBackend> {
    let mut follow_ups = Vec::new();

    match message {
        MessageFromBackend::Toast(_) => {}
        MessageFromBackend::ConfigurationResponse(config) => {
            SettingsEntity::update(&data.settings, config, cx)
        }
        MessageFromBackend::UnreadCountResponse(result) => {
            let _ = data.bell.update(cx, |bell, cx| {
                bell.apply_count(result);
                cx.notify();
            });
        }
        MessageFromBackend::NotificationPageResponse { page, result } => {
            log::debug!("Received notification page {page}");
            follow_ups.extend(update_list(data, cx, |list| list.apply_page(result)));
        }
        MessageFromBackend::NotificationMarkedRead { id, result } => {
            let succeeded = result.is_ok();
            update_list(data, cx, |list| {
                list.apply_mark_read(id, result, Utc::now());
                None
            });
            if succeeded {
                follow_ups.extend(refresh_unread_count(data, cx));
            }
        }
        MessageFromBackend::AllNotificationsMarkedRead(result) => {
            let succeeded = result.is_ok();
            follow_ups.extend(update_list(data, cx, |list| list.apply_mark_all_read(result)));
            if succeeded {
                follow_ups.extend(refresh_unread_count(data, cx));
            }
        }
        MessageFromBackend::NotificationDeleted { id, result } => {
            let succeeded = result.is_ok();
            update_list(data, cx, |list| {
                list.apply_delete(id, result);
                None
            });
            if succeeded {
                follow_ups.extend(refresh_unread_count(data, cx));
            }
        }
        MessageFromBackend::ReadNotificationsDeleted(result) => {
            let succeeded = result.is_ok();
            follow_ups.extend(update_list(data, cx, |list| list.apply_delete_all_read(result)));
            if succeeded {
                follow_ups.extend(refresh_unread_count(data, cx));
            }
        }
    }

    follow_ups
}

pub fn run(
    mut rx: mpsc::Receiver<MessageFromBackend>,
    tx: mpsc::Sender<MessageToBackend>,
) -> anyhow::Result<()> {
    let app = Application::new().with_assets(gpui_component_assets::Assets);

    app.run(move |cx| {
        gpui_component::init(cx);

        let data = DataEntities {
            settings: cx.new(|_| SettingsEntity::default()),
            bell: cx.new(|_| BellEntity::default()),
            notifications: cx.new(|_| NotificationListEntity::default()),
        };
        let listener_data = data.clone();

        let bridge = BackendBridge { to_backend: tx };
        cx.set_global(bridge.clone());

        cx.spawn(async move |cx| {
            cx.open_window(WindowOptions::default(), |window, cx| {
                let window_handle = window.window_handle();
                let listener_bridge = bridge.clone();
                cx.spawn(async move |cx| {
                    while let Some(message) = rx.recv().await {
                        log::debug!("Got a message from backend: {message:?}");

                        if let MessageFromBackend::Toast(toast) = &message {
                            let toast = ToastNotification::new()
                                .message(toast.message.clone())
                                .with_type(toast_type(toast.kind));
                            let pushed = window_handle.update(cx, |_, window, cx| {
                                window.push_notification(toast, cx);
                            });
                            if let Err(error) = pushed {
                                log::warn!("Failed to show a toast: {error}");
                            }
                        }

                        for request in apply_backend_message(&listener_data, message, cx) {
                            listener_bridge.send(request).await;
                        }
                    }
                    log::info!("Backend bridge closed");
                })
                .detach();

                cx.spawn(async move |_| {
                    bridge.send(MessageToBackend::ConfigurationRequest).await;
                })
                .detach();

                let view = cx.new(|cx| crate::views::FrontendUi::new(&data, window, cx));
                cx.new(|cx| Root::new(view, window, cx))
            })?;

            Ok::<_, anyhow::Error>(())
        })
        .detach();
    });

    Ok(())
}
