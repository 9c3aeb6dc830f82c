//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `LUMIZO_ADMIN_PASSWORD` - Password of the distinguished admin entry
//!
//! ## Optional
//! - `LUMIZO_ADMIN_USERNAME` - Admin username (default: admin)
//! - `LUMIZO_USERS` - Extra quick-login records as comma-separated
//!   `username:password` pairs
//! - `LUMIZO_DATA_DIR` - Directory for persisted state (default: .lumizo)
//! - `LUMIZO_LOGIN_DELAY_MS` - Simulated login latency (default: 800)

use std::path::PathBuf;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

use lumizo_core::Username;

/// Default simulated login latency in milliseconds.
const DEFAULT_LOGIN_DELAY_MS: u64 = 800;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// A configured credential record.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone)]
pub struct UserRecord {
    /// Login username.
    pub username: Username,
    /// Plaintext password. Held in a `SecretString` so it never leaks
    /// through `Debug` or log output.
    pub password: SecretString,
}

impl UserRecord {
    /// Create a new credential record.
    #[must_use]
    pub const fn new(username: Username, password: SecretString) -> Self {
        Self { username, password }
    }

    /// Whether the supplied password matches this record.
    #[must_use]
    pub fn password_matches(&self, candidate: &str) -> bool {
        self.password.expose_secret() == candidate
    }
}

impl std::fmt::Debug for UserRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserRecord")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// The process-wide credential table, loaded once at startup.
///
/// Holds the distinguished admin entry plus any extra quick-login records.
#[derive(Debug, Clone)]
pub struct CredentialsConfig {
    admin: UserRecord,
    extra: Vec<UserRecord>,
}

impl CredentialsConfig {
    /// Create a credential table from the admin entry and extra records.
    #[must_use]
    pub const fn new(admin: UserRecord, extra: Vec<UserRecord>) -> Self {
        Self { admin, extra }
    }

    /// The distinguished admin entry checked by the single-credential login.
    #[must_use]
    pub const fn admin(&self) -> &UserRecord {
        &self.admin
    }

    /// All records, admin first.
    pub fn users(&self) -> impl Iterator<Item = &UserRecord> {
        std::iter::once(&self.admin).chain(self.extra.iter())
    }

    /// Find the first record whose password matches.
    ///
    /// This is the quick-login lookup: it ignores usernames entirely and
    /// matches by password alone.
    #[must_use]
    pub fn find_by_password(&self, password: &str) -> Option<&UserRecord> {
        self.users().find(|u| u.password_matches(password))
    }
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Directory persisted state is written into.
    pub data_dir: PathBuf,
    /// Simulated login latency.
    pub login_delay: Duration,
    /// Credential table.
    pub credentials: CredentialsConfig,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let data_dir = PathBuf::from(get_env_or_default("LUMIZO_DATA_DIR", ".lumizo"));

        let delay_ms = get_env_or_default(
            "LUMIZO_LOGIN_DELAY_MS",
            &DEFAULT_LOGIN_DELAY_MS.to_string(),
        )
        .parse::<u64>()
        .map_err(|e| {
            ConfigError::InvalidEnvVar("LUMIZO_LOGIN_DELAY_MS".to_string(), e.to_string())
        })?;

        let admin_username = Username::parse(&get_env_or_default("LUMIZO_ADMIN_USERNAME", "admin"))
            .map_err(|e| {
                ConfigError::InvalidEnvVar("LUMIZO_ADMIN_USERNAME".to_string(), e.to_string())
            })?;
        let admin_password = SecretString::from(get_required_env("LUMIZO_ADMIN_PASSWORD")?);

        let extra = match get_optional_env("LUMIZO_USERS") {
            Some(raw) => parse_users(&raw)
                .map_err(|e| ConfigError::InvalidEnvVar("LUMIZO_USERS".to_string(), e))?,
            None => Vec::new(),
        };

        Ok(Self {
            data_dir,
            login_delay: Duration::from_millis(delay_ms),
            credentials: CredentialsConfig::new(
                UserRecord::new(admin_username, admin_password),
                extra,
            ),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse comma-separated `username:password` records.
fn parse_users(raw: &str) -> Result<Vec<UserRecord>, String> {
    let mut users = Vec::new();

    for entry in raw.split(',') {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }

        let (username, password) = entry
            .split_once(':')
            .ok_or_else(|| format!("expected username:password, got '{entry}'"))?;

        let username = Username::parse(username).map_err(|e| e.to_string())?;
        if password.is_empty() {
            return Err(format!("empty password for user '{username}'"));
        }

        users.push(UserRecord::new(
            username,
            SecretString::from(password.to_string()),
        ));
    }

    Ok(users)
}
