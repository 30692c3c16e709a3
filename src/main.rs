// SPDX-License-Identifier: MIT

//! CloudSync Todo API Server
//!
//! A CRUD backend for a personal todo list, persisting in Firestore and
//! delegating identity to Firebase Authentication.

use cloudsync_todo::{
    config::Config,
    db::FirestoreDb,
    services::{FirebaseAuthVerifier, ServiceAccountCredentials, TodoService, UserService},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging for GCP
    init_logging();

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting CloudSync Todo API");

    // Load credentials and connect to Firestore. A bad credential file
    // is fatal: the process must not accept traffic without it.
    let db = match &config.service_account_file {
        Some(path) => {
            let credentials = ServiceAccountCredentials::load(path)?;

            if credentials.project_id() != config.firebase_project_id {
                tracing::warn!(
                    credential_project = credentials.project_id(),
                    configured_project = %config.firebase_project_id,
                    "Service account project differs from FIREBASE_PROJECT_ID"
                );
            }

            FirestoreDb::new(&credentials)
                .await
                .expect("Failed to connect to Firestore")
        }
        // Config::from_env only allows a missing credential file when
        // FIRESTORE_EMULATOR_HOST is set.
        None => FirestoreDb::new_emulator(&config.firebase_project_id)
            .await
            .expect("Failed to connect to Firestore emulator"),
    };

    // Initialize the ID token verifier
    let firebase_auth = Arc::new(
        FirebaseAuthVerifier::new(&config.firebase_project_id)
            .expect("Failed to initialize Firebase auth verifier"),
    );

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        db: db.clone(),
        firebase_auth,
        todos: TodoService::new(db.clone()),
        users: UserService::new(db),
    });

    // Build router
    let app = cloudsync_todo::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging (GCP-compliant).
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("cloudsync_todo=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
