// SPDX-License-Identifier: MIT

//! CloudSync Todo: a personal todo list backend.
//!
//! This crate provides a stateless HTTP API backed by Firestore, with
//! identity delegated to Firebase Authentication. All durable state
//! lives in the document store.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use db::FirestoreDb;
use services::{FirebaseAuthVerifier, TodoService, UserService};
use std::sync::Arc;

/// Shared application state.
///
/// Built once at startup; read-only afterwards and safe to share across
/// request tasks.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
    pub firebase_auth: Arc<FirebaseAuthVerifier>,
    pub todos: TodoService,
    pub users: UserService,
}
