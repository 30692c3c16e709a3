//! Application configuration loaded from environment variables.
//!
//! The only secret-adjacent value is the path to the Firebase service
//! account file; the file itself is read once at startup by the
//! credential loader.

use std::env;
use std::path::PathBuf;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Firebase / GCP project ID (also the expected ID token audience)
    pub firebase_project_id: String,
    /// Path to the Firebase service account JSON file.
    /// May be None only when running against the Firestore emulator.
    pub service_account_file: Option<PathBuf>,
    /// Frontend URL for CORS
    pub frontend_url: String,
    /// Server port
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let emulator = env::var("FIRESTORE_EMULATOR_HOST").is_ok();

        let service_account_file = match env::var("FIREBASE_SERVICE_ACCOUNT_FILE") {
            Ok(path) => Some(PathBuf::from(path.trim())),
            Err(_) if emulator => None,
            Err(_) => return Err(ConfigError::Missing("FIREBASE_SERVICE_ACCOUNT_FILE")),
        };

        Ok(Self {
            firebase_project_id: env::var("FIREBASE_PROJECT_ID")
                .map_err(|_| ConfigError::Missing("FIREBASE_PROJECT_ID"))?,
            service_account_file,
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
        })
    }

    /// Default config for testing only.
    pub fn test_default() -> Self {
        Self {
            firebase_project_id: "test-project".to_string(),
            service_account_file: None,
            frontend_url: "http://localhost:5173".to_string(),
            port: 8080,
        }
    }
}

/// Configuration errors. All fatal at startup: the process must not
/// accept traffic without a valid configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Service account file {0} is missing or unreadable: {1}")]
    Unreadable(PathBuf, String),

    #[error("Service account file {0} is malformed: {1}")]
    Malformed(PathBuf, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        env::set_var("FIREBASE_PROJECT_ID", "env-test-project");
        env::set_var("FIREBASE_SERVICE_ACCOUNT_FILE", "/tmp/sa.json");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.firebase_project_id, "env-test-project");
        assert_eq!(
            config.service_account_file,
            Some(PathBuf::from("/tmp/sa.json"))
        );
        assert_eq!(config.port, 8080);
    }
}
