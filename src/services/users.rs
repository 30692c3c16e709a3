// SPDX-License-Identifier: MIT

//! User lifecycle: idempotent get-or-create on login, settings
//! management, and account deletion with cascade.

use crate::db::FirestoreDb;
use crate::error::{AppError, Result};
use crate::models::{SettingsPatch, User, UserSettings};
use crate::services::firebase_auth::VerifiedUser;
use chrono::Utc;
use validator::Validate;

/// Entity access layer for users and their settings.
#[derive(Clone)]
pub struct UserService {
    db: FirestoreDb,
}

impl UserService {
    pub fn new(db: FirestoreDb) -> Self {
        Self { db }
    }

    /// Get the caller's user document, creating it on first sight.
    ///
    /// Idempotent: the first call for a given subject creates the user
    /// with default settings; every later call only refreshes
    /// `last_login`. Profile fields come from the verified token claims
    /// and are captured at first login.
    pub async fn get_or_create(&self, identity: &VerifiedUser) -> Result<User> {
        let (user, created) = self.fetch_or_default(identity).await?;
        self.db.upsert_user(&user).await?;

        if created {
            tracing::info!(uid = %user.id, "Created user on first login");
        }
        Ok(user)
    }

    /// Get the caller's settings, creating the user with defaults if
    /// this is their first visit.
    pub async fn get_settings(&self, identity: &VerifiedUser) -> Result<UserSettings> {
        Ok(self.get_or_create(identity).await?.settings)
    }

    /// Apply a partial settings update.
    ///
    /// Fetch-or-default, patch, then one write: the `last_login` refresh
    /// and the settings change land in the same upsert.
    pub async fn update_settings(
        &self,
        identity: &VerifiedUser,
        patch: SettingsPatch,
    ) -> Result<UserSettings> {
        patch
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let (mut user, created) = self.fetch_or_default(identity).await?;
        apply_settings_patch(&mut user.settings, patch);
        self.db.upsert_user(&user).await?;

        if created {
            tracing::info!(uid = %user.id, "Created user on first login");
        }
        Ok(user.settings)
    }

    /// Delete the caller's account: every owned todo plus the user
    /// document with its embedded settings.
    ///
    /// Returns the number of documents deleted.
    pub async fn delete_account(&self, uid: &str) -> Result<usize> {
        tracing::info!(uid, "User-initiated account deletion");
        self.db.delete_user_data(uid).await
    }

    /// Fetch the caller's document with `last_login` refreshed, or build
    /// a fresh one with default settings. Performs no write; the flag
    /// says whether the document is new.
    async fn fetch_or_default(&self, identity: &VerifiedUser) -> Result<(User, bool)> {
        if let Some(mut user) = self.db.get_user(&identity.uid).await? {
            user.last_login = Utc::now();
            return Ok((user, false));
        }

        let now = Utc::now();
        let user = User {
            id: identity.uid.clone(),
            email: identity.email.clone(),
            display_name: identity.display_name.clone(),
            photo_url: identity.photo_url.clone(),
            created_at: now,
            last_login: now,
            settings: UserSettings::create_default(&identity.uid),
        };

        Ok((user, true))
    }
}

/// Apply a settings patch in place, enforcing the calendar invariant:
/// `calendar_id` is None whenever calendar sync is disabled.
fn apply_settings_patch(settings: &mut UserSettings, patch: SettingsPatch) {
    if let Some(enabled) = patch.notification_enabled {
        settings.notification_enabled = enabled;
    }
    if let Some(lead_time) = patch.notification_lead_time {
        settings.notification_lead_time = lead_time;
    }
    if let Some(calendar_id) = patch.calendar_id {
        settings.calendar_id = Some(calendar_id);
    }
    if let Some(enabled) = patch.calendar_sync_enabled {
        settings.calendar_sync_enabled = enabled;
    }
    if !settings.calendar_sync_enabled {
        settings.calendar_id = None;
    }
}
