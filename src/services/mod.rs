// SPDX-License-Identifier: MIT

//! Service layer.
//!
//! - `credentials`: service account credential loader (startup-only)
//! - `firebase_auth`: Firebase ID token verification
//! - `todos`: owner-scoped todo operations
//! - `users`: user lifecycle and settings

pub mod credentials;
pub mod firebase_auth;
pub mod todos;
pub mod users;

pub use credentials::ServiceAccountCredentials;
pub use firebase_auth::FirebaseAuthVerifier;
pub use todos::{TodoFilter, TodoService, TodoSort};
pub use users::UserService;
