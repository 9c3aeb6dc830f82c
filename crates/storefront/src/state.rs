//! Application state wiring.
//!
//! The stores are explicitly constructed instances, not module-level
//! globals: `AppState::init` builds them from configuration at process
//! start and performs the one-time restore-from-storage. There is no
//! teardown; the stores live for the process lifetime.

use crate::config::StorefrontConfig;
use crate::services::{CartStore, SessionStore};
use crate::storage::KvStore;

/// The storefront's state core, owned by the process entry point and
/// passed to collaborators by reference.
#[derive(Debug)]
pub struct AppState {
    config: StorefrontConfig,
    session: SessionStore,
    cart: CartStore,
}

impl AppState {
    /// Build the stores from configuration and rehydrate persisted state.
    #[must_use]
    pub fn init(config: StorefrontConfig) -> Self {
        let storage = KvStore::new(&config.data_dir);

        let mut session = SessionStore::new(
            storage.clone(),
            config.credentials.clone(),
            config.login_delay,
        );
        session.restore();

        let mut cart = CartStore::new(storage);
        cart.restore();

        Self {
            config,
            session,
            cart,
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    /// Get a reference to the session store.
    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Get a mutable reference to the session store.
    pub fn session_mut(&mut self) -> &mut SessionStore {
        &mut self.session
    }

    /// Get a reference to the cart store.
    #[must_use]
    pub fn cart(&self) -> &CartStore {
        &self.cart
    }

    /// Get a mutable reference to the cart store.
    pub fn cart_mut(&mut self) -> &mut CartStore {
        &mut self.cart
    }
}
