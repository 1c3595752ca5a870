//! Engine configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `ARCADIA_DATA_DIR` - Directory holding the persisted records (default: `./data`)
//! - `ARCADIA_ADMIN_USERNAME` - Bootstrap admin username (default: `admin`)
//! - `ARCADIA_ADMIN_EMAIL` - Bootstrap admin email (default: `admin@admin.com`)
//! - `ARCADIA_ADMIN_PASSWORD` - Bootstrap admin password (default: `admin123`)
//!
//! Every variable has a default so the engine runs out of the box; the
//! admin credential defaults are the fixed bootstrap credential described
//! in the session-store docs and should be overridden in any deployment
//! that matters.

use std::path::PathBuf;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

use arcadia_core::Email;

/// Default data directory when `ARCADIA_DATA_DIR` is unset.
const DEFAULT_DATA_DIR: &str = "./data";

/// Fixed bootstrap admin credential. A known weakness carried over from the
/// data this engine must stay consistent with, isolated here so it can be
/// replaced without touching the session store.
const DEFAULT_ADMIN_USERNAME: &str = "admin";
const DEFAULT_ADMIN_EMAIL: &str = "admin@admin.com";
const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Engine configuration.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Directory holding the persisted key-value records.
    pub data_dir: PathBuf,
    /// Bootstrap admin account created on first run.
    pub admin: AdminBootstrap,
}

/// The admin account guaranteed to exist after first initialization.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone)]
pub struct AdminBootstrap {
    /// Admin username.
    pub username: String,
    /// Admin email; also how an existing admin account is recognized
    /// (case-insensitive match).
    pub email: Email,
    /// Admin password.
    pub password: SecretString,
}

impl std::fmt::Debug for AdminBootstrap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminBootstrap")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl Default for AdminBootstrap {
    fn default() -> Self {
        Self {
            username: DEFAULT_ADMIN_USERNAME.to_string(),
            // The default is a valid address by construction
            email: Email::parse(DEFAULT_ADMIN_EMAIL)
                .unwrap_or_else(|_| unreachable!("default admin email is valid")),
            password: SecretString::from(DEFAULT_ADMIN_PASSWORD),
        }
    }
}

impl AdminBootstrap {
    /// The bootstrap password in the clear, for seeding the user record.
    #[must_use]
    pub fn password_plaintext(&self) -> String {
        self.password.expose_secret().to_string()
    }
}

impl EngineConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but invalid (currently
    /// only a malformed `ARCADIA_ADMIN_EMAIL`).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let data_dir = PathBuf::from(get_env_or_default("ARCADIA_DATA_DIR", DEFAULT_DATA_DIR));

        let email_raw = get_env_or_default("ARCADIA_ADMIN_EMAIL", DEFAULT_ADMIN_EMAIL);
        let email = Email::parse(&email_raw).map_err(|e| {
            ConfigError::InvalidEnvVar("ARCADIA_ADMIN_EMAIL".to_string(), e.to_string())
        })?;

        let admin = AdminBootstrap {
            username: get_env_or_default("ARCADIA_ADMIN_USERNAME", DEFAULT_ADMIN_USERNAME),
            email,
            password: SecretString::from(get_env_or_default(
                "ARCADIA_ADMIN_PASSWORD",
                DEFAULT_ADMIN_PASSWORD,
            )),
        };

        Ok(Self { data_dir, admin })
    }

    /// Configuration rooted at the given data directory, with default
    /// admin bootstrap credentials. Mostly useful in tests and tools.
    #[must_use]
    pub fn at(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            admin: AdminBootstrap::default(),
        }
    }
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
