use gpui::{AppContext, Entity};
use ticketbell_bridge::config::Config;

/// Effective configuration as reported by the backend.
#[derive(Debug, Clone, Default)]
pub struct SettingsEntity {
    pub config: Config,
    /// Set once the backend has answered the configuration request.
    pub loaded: bool,
}

impl SettingsEntity {
    pub fn update<C: AppContext>(entity: &Entity<Self>, config: Config, cx: &mut C) {
        entity.update(cx, |this, cx| {
            this.config = config;
            this.loaded = true;
            cx.notify();
        });
    }
}
