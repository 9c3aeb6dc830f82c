//! Integration tests for Lumizo.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p lumizo-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_persistence` - Cart round-trips through real on-disk storage
//! - `session_auth` - Login flows and session persistence
//!
//! Each test builds an [`AppState`] over its own temporary data
//! directory, so tests are independent and leave nothing behind.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::Path;
use std::time::Duration;

use secrecy::SecretString;

use lumizo_core::Username;
use lumizo_storefront::config::{CredentialsConfig, StorefrontConfig, UserRecord};
use lumizo_storefront::state::AppState;

/// Password the test admin entry is configured with.
pub const ADMIN_PASSWORD: &str = "correct-horse-battery";

/// Password of the extra quick-login record.
pub const ALICE_PASSWORD: &str = "alice-pw";

/// Build a test configuration over the given data directory.
///
/// The simulated login delay is zero so tests run at full speed.
///
/// # Panics
///
/// Panics if the built-in test usernames fail validation.
#[must_use]
pub fn test_config(data_dir: &Path) -> StorefrontConfig {
    #[allow(clippy::unwrap_used)]
    let admin = UserRecord::new(
        Username::parse("admin").unwrap(),
        SecretString::from(ADMIN_PASSWORD),
    );
    #[allow(clippy::unwrap_used)]
    let alice = UserRecord::new(
        Username::parse("alice").unwrap(),
        SecretString::from(ALICE_PASSWORD),
    );

    StorefrontConfig {
        data_dir: data_dir.to_path_buf(),
        login_delay: Duration::ZERO,
        credentials: CredentialsConfig::new(admin, vec![alice]),
    }
}

/// Build an [`AppState`] over the given data directory, restoring any
/// state a previous instance persisted there.
#[must_use]
pub fn app(data_dir: &Path) -> AppState {
    AppState::init(test_config(data_dir))
}
