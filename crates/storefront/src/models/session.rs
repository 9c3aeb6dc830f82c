//! Session-related types.
//!
//! The session record exists if and only if a successful login occurred
//! and no logout happened since. It is persisted on login and rehydrated
//! once at process start.

use serde::{Deserialize, Serialize};

use lumizo_core::Username;

/// The authenticated identity.
///
/// Minimal data persisted to identify the logged-in user across reloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Login username.
    pub username: Username,
    /// Role label attached at login time.
    pub role: String,
}

/// Storage namespaces for persisted state.
pub mod keys {
    /// Namespace for the persisted session record.
    pub const ADMIN_USER: &str = "admin_user";

    /// Namespace for the persisted cart lines.
    pub const CART: &str = "lumizo_cart";
}
