// SPDX-License-Identifier: MIT

//! User profile and account routes.

use crate::error::Result;
use crate::models::User;
use crate::services::firebase_auth::VerifiedUser;
use crate::AppState;
use axum::{
    extract::State,
    routing::{delete, get},
    Extension, Json, Router,
};
use serde::Serialize;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/me", get(get_me))
        .route("/account", delete(delete_account))
}

/// Get the current user's profile.
///
/// This is the login touchpoint: first call creates the user with
/// default settings, later calls refresh `last_login`.
async fn get_me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<VerifiedUser>,
) -> Result<Json<User>> {
    let profile = state.users.get_or_create(&user).await?;
    Ok(Json(profile))
}

/// Response for account deletion.
#[derive(Serialize)]
pub struct DeleteAccountResponse {
    pub success: bool,
    pub deleted_documents: usize,
}

/// Delete the caller's account and all associated data.
async fn delete_account(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<VerifiedUser>,
) -> Result<Json<DeleteAccountResponse>> {
    let deleted_documents = state.users.delete_account(&user.uid).await?;

    Ok(Json(DeleteAccountResponse {
        success: true,
        deleted_documents,
    }))
}
