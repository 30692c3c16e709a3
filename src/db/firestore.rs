// SPDX-License-Identifier: MIT

//! Firestore client wrapper with typed operations.
//!
//! Provides document operations for:
//! - Users (profile + embedded settings)
//! - Todos (owner-scoped task documents)
//!
//! Firestore is the single source of truth; this wrapper holds no cache
//! or derived state. Ownership checks live in the service layer above.

use crate::db::collections;
use crate::error::AppError;
use crate::models::{Todo, User};
use crate::services::credentials::ServiceAccountCredentials;

// Firestore limits batch/transaction writes to 500 operations.
// We use a safe limit of 400 to allow headroom.
const BATCH_SIZE: usize = 400;

/// Firestore database client.
///
/// Constructed once at startup and shared through `AppState`; the inner
/// client is read-only after initialization and safe for concurrent use.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a Firestore client authenticated with a service account.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST
    /// and use [`FirestoreDb::new_emulator`] instead.
    pub async fn new(credentials: &ServiceAccountCredentials) -> Result<Self, AppError> {
        let options = firestore::FirestoreDbOptions::new(credentials.project_id().to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::File(credentials.file_path().to_path_buf()),
        )
        .await
        .map_err(|e| AppError::ServiceUnavailable(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = credentials.project_id(), "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    pub async fn new_emulator(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        // ExternalJwtFunctionSource provides a dummy token without needing
        // a custom TokenSource implementation struct.
        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::ServiceUnavailable(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::ServiceUnavailable("Database not connected (offline mode)".to_string()))
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Get a user by Firebase UID.
    pub async fn get_user(&self, uid: &str) -> Result<Option<User>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::USERS)
            .obj()
            .one(uid)
            .await
            .map_err(|e| AppError::ServiceUnavailable(e.to_string()))
    }

    /// Create or update a user (settings included, same document).
    pub async fn upsert_user(&self, user: &User) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::USERS)
            .document_id(&user.id)
            .object(user)
            .execute()
            .await
            .map_err(|e| AppError::ServiceUnavailable(e.to_string()))?;
        Ok(())
    }

    // ─── Todo Operations ─────────────────────────────────────────

    /// Get a todo by ID, regardless of owner.
    pub async fn get_todo(&self, id: &str) -> Result<Option<Todo>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::TODOS)
            .obj()
            .one(id)
            .await
            .map_err(|e| AppError::ServiceUnavailable(e.to_string()))
    }

    /// Create or overwrite a todo document.
    pub async fn set_todo(&self, todo: &Todo) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::TODOS)
            .document_id(&todo.id)
            .object(todo)
            .execute()
            .await
            .map_err(|e| AppError::ServiceUnavailable(e.to_string()))?;
        Ok(())
    }

    /// Delete a todo document by ID.
    pub async fn delete_todo(&self, id: &str) -> Result<(), AppError> {
        self.get_client()?
            .fluent()
            .delete()
            .from(collections::TODOS)
            .document_id(id)
            .execute()
            .await
            .map_err(|e| AppError::ServiceUnavailable(e.to_string()))?;
        Ok(())
    }

    /// Get all todos belonging to a user, optionally filtered by
    /// completion state. Ordering is applied by the service layer.
    pub async fn get_todos_for_user(
        &self,
        uid: &str,
        completed: Option<bool>,
    ) -> Result<Vec<Todo>, AppError> {
        let uid = uid.to_string();
        let query = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::TODOS);

        let query = if let Some(completed) = completed {
            query.filter(move |q| {
                q.for_all([
                    q.field("userId").eq(uid.clone()),
                    q.field("completed").eq(completed),
                ])
            })
        } else {
            query.filter(move |q| q.field("userId").eq(uid.clone()))
        };

        query
            .obj()
            .query()
            .await
            .map_err(|e| AppError::ServiceUnavailable(e.to_string()))
    }

    // ─── Helper Methods ────────────────────────────────────────────

    /// Helper to batch delete documents using transactions.
    async fn batch_delete<T, F>(
        &self,
        items: &[T],
        collection: &str,
        id_extractor: F,
    ) -> Result<(), AppError>
    where
        F: Fn(&T) -> String,
    {
        let client = self.get_client()?;

        for chunk in items.chunks(BATCH_SIZE) {
            let mut transaction = client
                .begin_transaction()
                .await
                .map_err(|e| AppError::ServiceUnavailable(format!("Failed to begin transaction: {}", e)))?;

            for item in chunk {
                let doc_id = id_extractor(item);
                client
                    .fluent()
                    .delete()
                    .from(collection)
                    .document_id(&doc_id)
                    .add_to_transaction(&mut transaction)
                    .map_err(|e| {
                        AppError::ServiceUnavailable(format!(
                            "Failed to add deletion to transaction for {}: {}",
                            collection, e
                        ))
                    })?;
            }

            transaction.commit().await.map_err(|e| {
                AppError::ServiceUnavailable(format!("Failed to commit batch deletion: {}", e))
            })?;
        }

        Ok(())
    }

    // ─── User Data Deletion (account removal) ──────────────────────

    /// Delete ALL data for a user: every owned todo plus the user
    /// document itself (embedded settings go with it).
    ///
    /// Returns the number of documents deleted.
    pub async fn delete_user_data(&self, uid: &str) -> Result<usize, AppError> {
        let mut deleted_count = 0;

        // 1. Delete all owned todos
        let todos = self.get_todos_for_user(uid, None).await?;

        let count = todos.len();
        self.batch_delete(&todos, collections::TODOS, |todo: &Todo| todo.id.clone())
            .await?;

        deleted_count += count;
        tracing::debug!(uid, count, "Deleted todos");

        // 2. Delete user profile (settings are embedded)
        self.get_client()?
            .fluent()
            .delete()
            .from(collections::USERS)
            .document_id(uid)
            .execute()
            .await
            .map_err(|e| AppError::ServiceUnavailable(e.to_string()))?;
        deleted_count += 1;
        tracing::debug!(uid, "Deleted user profile");

        tracing::info!(uid, deleted_count, "User data deletion complete");

        Ok(deleted_count)
    }
}
