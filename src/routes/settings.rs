// SPDX-License-Identifier: MIT

//! User settings routes.

use crate::error::Result;
use crate::models::{SettingsPatch, UserSettings};
use crate::routes::extract::Json;
use crate::services::firebase_auth::VerifiedUser;
use crate::AppState;
use axum::{extract::State, routing::get, Extension, Router};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/settings", get(get_settings).patch(update_settings))
}

/// Get the caller's settings, creating defaults if absent.
async fn get_settings(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<VerifiedUser>,
) -> Result<Json<UserSettings>> {
    let settings = state.users.get_settings(&user).await?;
    Ok(Json(settings))
}

/// Partially update the caller's settings.
async fn update_settings(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<VerifiedUser>,
    Json(patch): Json<SettingsPatch>,
) -> Result<Json<UserSettings>> {
    let settings = state.users.update_settings(&user, patch).await?;
    Ok(Json(settings))
}
