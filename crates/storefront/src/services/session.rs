//! Session store.
//!
//! Holds the authenticated identity, derives `is_authenticated`, and
//! persists the session across reloads. Credential mismatch is a normal
//! boolean outcome, never an error; malformed persisted state is swallowed
//! by the storage adapter and the store starts unauthenticated.

use std::time::Duration;

use crate::config::CredentialsConfig;
use crate::models::session::Session;
use crate::models::store_keys;
use crate::storage::KvStore;

/// Role attached to every session created by the credential login.
const ADMIN_ROLE: &str = "admin";

/// Client-side session state manager.
///
/// Mutations take `&mut self`; exclusive access makes a second `login`
/// racing the first impossible by construction.
#[derive(Debug)]
pub struct SessionStore {
    storage: KvStore,
    credentials: CredentialsConfig,
    login_delay: Duration,
    session: Option<Session>,
}

impl SessionStore {
    /// Create an unauthenticated store.
    ///
    /// Call [`SessionStore::restore`] once at process start to rehydrate
    /// a persisted session.
    #[must_use]
    pub const fn new(
        storage: KvStore,
        credentials: CredentialsConfig,
        login_delay: Duration,
    ) -> Self {
        Self {
            storage,
            credentials,
            login_delay,
            session: None,
        }
    }

    /// Rehydrate the persisted session, if any.
    ///
    /// Malformed persisted data is discarded by the storage adapter; the
    /// store then starts unauthenticated.
    pub fn restore(&mut self) {
        self.session = self.storage.load(store_keys::ADMIN_USER);
        if let Some(session) = &self.session {
            tracing::debug!("Restored session for {}", session.username);
        }
    }

    /// Attempt a credential login.
    ///
    /// The supplied pair is compared against the distinguished admin entry
    /// of the credential table. On match the session is created and
    /// persisted and `true` is returned; on mismatch nothing changes and
    /// `false` is returned.
    ///
    /// Suspends for the configured simulated latency before resolving.
    /// The check itself is local; the delay mimics a network round-trip
    /// for UX pacing.
    pub async fn login(&mut self, username: &str, password: &str) -> bool {
        tokio::time::sleep(self.login_delay).await;

        let admin = self.credentials.admin();
        if username != admin.username.as_str() || !admin.password_matches(password) {
            tracing::debug!("Login rejected for {username}");
            return false;
        }

        let session = Session {
            username: admin.username.clone(),
            // Role is fixed at login; the credential table has no role column
            role: ADMIN_ROLE.to_owned(),
        };
        self.persist(&session);
        self.session = Some(session);
        true
    }

    /// Attempt a quick login by password alone.
    ///
    /// Scans every configured record for a password match, ignoring
    /// usernames, then re-invokes [`SessionStore::login`] with the matched
    /// record's username. A shared password therefore authenticates as
    /// whichever record owns it first.
    pub async fn quick_login(&mut self, password: &str) -> bool {
        let Some(username) = self
            .credentials
            .find_by_password(password)
            .map(|user| user.username.clone())
        else {
            tracing::debug!("Quick login rejected: no record with that password");
            return false;
        };

        self.login(username.as_str(), password).await
    }

    /// Clear the session and delete its persisted entry.
    pub fn logout(&mut self) {
        self.session = None;
        self.storage.remove(store_keys::ADMIN_USER);
    }

    /// Whether a session currently exists.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    /// The current session, if authenticated.
    #[must_use]
    pub const fn current_user(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    fn persist(&self, session: &Session) {
        // Fire-and-forget: the in-memory session stays authoritative even
        // if the write fails
        if let Err(e) = self.storage.save(store_keys::ADMIN_USER, session) {
            tracing::error!("Failed to persist session: {e}");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::UserRecord;
    use lumizo_core::Username;
    use secrecy::SecretString;

    fn credentials() -> CredentialsConfig {
        CredentialsConfig::new(
            UserRecord::new(
                Username::parse("admin").unwrap(),
                SecretString::from("correct-horse"),
            ),
            vec![UserRecord::new(
                Username::parse("alice").unwrap(),
                SecretString::from("alice-pw"),
            )],
        )
    }

    fn store() -> (tempfile::TempDir, SessionStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(
            KvStore::new(dir.path()),
            credentials(),
            Duration::ZERO,
        );
        (dir, store)
    }

    #[tokio::test]
    async fn test_login_success() {
        let (_dir, mut store) = store();
        assert!(!store.is_authenticated());

        assert!(store.login("admin", "correct-horse").await);
        assert!(store.is_authenticated());

        let session = store.current_user().unwrap();
        assert_eq!(session.username.as_str(), "admin");
        assert_eq!(session.role, "admin");
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let (_dir, mut store) = store();
        assert!(!store.login("admin", "wrong").await);
        assert!(!store.is_authenticated());
        assert!(store.current_user().is_none());
    }

    #[tokio::test]
    async fn test_login_checks_admin_entry_only() {
        // alice is in the table but the credential login only consults
        // the distinguished admin entry
        let (_dir, mut store) = store();
        assert!(!store.login("alice", "alice-pw").await);
        assert!(!store.is_authenticated());
    }

    #[tokio::test]
    async fn test_quick_login_matches_by_password_alone() {
        let (_dir, mut store) = store();
        assert!(store.quick_login("correct-horse").await);
        assert!(store.is_authenticated());
    }

    #[tokio::test]
    async fn test_quick_login_non_admin_password_fails_login() {
        // Quick login finds alice by password, but the re-invoked
        // credential login still checks the admin entry and rejects her
        let (_dir, mut store) = store();
        assert!(!store.quick_login("alice-pw").await);
        assert!(!store.is_authenticated());
    }

    #[tokio::test]
    async fn test_quick_login_unknown_password() {
        let (_dir, mut store) = store();
        assert!(!store.quick_login("nope").await);
        assert!(!store.is_authenticated());
    }

    #[tokio::test]
    async fn test_logout_clears_session_and_storage() {
        let (dir, mut store) = store();
        assert!(store.login("admin", "correct-horse").await);
        assert!(dir.path().join("admin_user.json").exists());

        store.logout();
        assert!(!store.is_authenticated());
        assert!(!dir.path().join("admin_user.json").exists());
    }

    #[tokio::test]
    async fn test_restore_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = KvStore::new(dir.path());

        let mut first = SessionStore::new(storage.clone(), credentials(), Duration::ZERO);
        assert!(first.login("admin", "correct-horse").await);

        let mut second = SessionStore::new(storage, credentials(), Duration::ZERO);
        assert!(!second.is_authenticated());
        second.restore();
        assert!(second.is_authenticated());
        assert_eq!(second.current_user().unwrap().username.as_str(), "admin");
    }

    #[test]
    fn test_restore_malformed_session_purges_entry() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("admin_user.json"), "{broken").unwrap();

        let storage = KvStore::new(dir.path());
        let mut store = SessionStore::new(storage.clone(), credentials(), Duration::ZERO);
        store.restore();

        assert!(!store.is_authenticated());
        // The bad entry is gone; a subsequent load reads as absent
        assert!(storage.load::<Session>(store_keys::ADMIN_USER).is_none());
        assert!(!dir.path().join("admin_user.json").exists());
    }

    #[tokio::test(start_paused = true)]
    async fn test_login_observes_configured_delay() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = SessionStore::new(
            KvStore::new(dir.path()),
            credentials(),
            Duration::from_millis(800),
        );

        let before = tokio::time::Instant::now();
        assert!(store.login("admin", "correct-horse").await);
        assert!(before.elapsed() >= Duration::from_millis(800));
    }
}
