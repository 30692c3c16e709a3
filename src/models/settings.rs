//! Per-user settings, embedded in the user document.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// One settings record per user, created with defaults alongside the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    /// Owning user's Firebase UID (the settings' own identity)
    pub user_id: String,
    pub notification_enabled: bool,
    /// Lead time before the due date, in minutes. Never negative.
    pub notification_lead_time: i64,
    pub calendar_sync_enabled: bool,
    /// External calendar ID. None whenever calendar sync is disabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calendar_id: Option<String>,
}

impl UserSettings {
    /// Default settings created at the same moment as the owning user.
    pub fn create_default(user_id: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            notification_enabled: true,
            notification_lead_time: 15,
            calendar_sync_enabled: false,
            calendar_id: None,
        }
    }
}

/// Partial update to user settings. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    pub notification_enabled: Option<bool>,
    #[validate(range(min = 0, message = "notificationLeadTime must not be negative"))]
    pub notification_lead_time: Option<i64>,
    pub calendar_sync_enabled: Option<bool>,
    pub calendar_id: Option<String>,
}
