//! User model for storage and API.

use crate::models::UserSettings;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User profile stored in the `users` collection, keyed by Firebase UID.
///
/// Profile fields are sourced from the identity provider's token claims
/// at first login. Settings are an owned 1:1 sub-entity embedded in the
/// same document, so they share the user's lifecycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Firebase Authentication subject claim (never server-generated)
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(rename = "photoURL", skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    /// Set once, on first successful login
    pub created_at: DateTime<Utc>,
    /// Refreshed on every login
    pub last_login: DateTime<Utc>,
    pub settings: UserSettings,
}
