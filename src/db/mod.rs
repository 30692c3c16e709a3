//! Database layer (Firestore).

pub mod firestore;

pub use firestore::FirestoreDb;

/// Collection names as constants.
pub mod collections {
    /// Todos, keyed by server-assigned todo ID
    pub const TODOS: &str = "todos";
    /// User profiles (settings embedded), keyed by Firebase UID
    pub const USERS: &str = "users";
}
