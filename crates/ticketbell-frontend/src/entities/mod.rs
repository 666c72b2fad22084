use gpui::Entity;

pub mod bell_entity;
pub mod notification_list_entity;
pub mod settings_entity;

/// Shared view state, updated by the backend listener and read by the views.
#[derive(Debug, Clone)]
pub struct DataEntities {
    pub settings: Entity<settings_entity::SettingsEntity>,
    pub bell: Entity<bell_entity::BellEntity>,
    pub notifications: Entity<notification_list_entity::NotificationListEntity>,
}
