//! Authentication service.
//!
//! [`AuthStore`] owns the signed-in session and persists it under
//! [`keys::SESSION_USER`]. Credential checks and account creation go through
//! an [`AuthBackend`]; the bundled [`MockDirectory`] keeps accounts in local
//! storage and simulates network latency.

mod directory;
mod error;

use std::fmt::Debug;
use std::future::Future;
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use cendev_core::UserId;

pub use directory::{DEMO_PASSWORD, MockDirectory, demo_users};
pub use error::AuthError;

use crate::models::{ProfileUpdate, Registration, User};
use crate::storage::{PersistenceAdapter, Persisted, StorageResult, keys};

/// Account lookup and creation behind the session.
///
/// `authenticate` and `create_account` are the slow calls; implementations
/// may suspend for as long as a round trip takes.
pub trait AuthBackend: Send + Sync + Debug {
    /// Resolves an email and password pair to an account.
    ///
    /// Returns `AuthError::InvalidCredentials` when nothing matches,
    /// including when `email` is not a valid address.
    fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<User, AuthError>> + Send;

    /// Creates an account.
    ///
    /// Returns `AuthError::InvalidEmail` or `AuthError::DuplicateEmail`
    /// without changing the directory.
    fn create_account(
        &mut self,
        registration: Registration,
    ) -> impl Future<Output = Result<User, AuthError>> + Send;

    /// Merges a profile update into the stored account.
    ///
    /// Returns `Ok(None)` if there is no account with `id`.
    fn update_account(
        &mut self,
        id: &UserId,
        update: &ProfileUpdate,
    ) -> Result<Option<User>, AuthError>;

    /// Looks an account up by ID.
    fn find_user(&self, id: &UserId) -> Option<User>;
}

/// Whether anyone is signed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState<'a> {
    Anonymous,
    Authenticated(&'a User),
}

impl SessionState<'_> {
    /// Whether this is an authenticated session.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }
}

/// The current session plus the backend that vouches for it.
///
/// A restored session always refers to an account the backend knows about.
#[derive(Debug)]
pub struct AuthStore<B = MockDirectory> {
    session: Persisted<Option<User>>,
    backend: B,
}

impl<B: AuthBackend> AuthStore<B> {
    /// Restores the session from storage.
    ///
    /// A persisted session whose user no longer exists in `backend` is
    /// discarded.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the adapter fails.
    pub fn load(storage: Arc<dyn PersistenceAdapter>, backend: B) -> StorageResult<Self> {
        let mut session: Persisted<Option<User>> = Persisted::load(keys::SESSION_USER, storage)?;

        if let Some(user) = session.get() {
            if backend.find_user(&user.id).is_none() {
                warn!(user_id = %user.id, "Discarding session for unknown user");
                session.replace(None)?;
            } else {
                debug!(user_id = %user.id, "Restored session");
            }
        }

        Ok(Self { session, backend })
    }

    /// The signed-in user, if any.
    #[must_use]
    pub const fn current_user(&self) -> Option<&User> {
        self.session.get().as_ref()
    }

    /// Whether someone is signed in.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.current_user().is_some()
    }

    /// The session as a state value.
    #[must_use]
    pub const fn state(&self) -> SessionState<'_> {
        match self.current_user() {
            Some(user) => SessionState::Authenticated(user),
            None => SessionState::Anonymous,
        }
    }

    /// The backend behind this store.
    #[must_use]
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    /// Signs in with an email and password.
    ///
    /// On failure the current session, signed in or not, is left as it was.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the pair does not match an
    /// account, or `AuthError::Storage` if the session cannot be persisted.
    #[instrument(skip(self, password))]
    pub async fn login(&mut self, email: &str, password: &str) -> Result<User, AuthError> {
        let user = self.backend.authenticate(email, password).await?;
        self.session.replace(Some(user.clone()))?;
        info!(user_id = %user.id, role = %user.role, "User logged in");
        Ok(user)
    }

    /// Creates an account and signs in as it.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` or `AuthError::DuplicateEmail`
    /// without touching the session, or `AuthError::Storage` if a snapshot
    /// cannot be persisted.
    #[instrument(skip(self, registration), fields(email = %registration.email, role = %registration.role))]
    pub async fn register(&mut self, registration: Registration) -> Result<User, AuthError> {
        let user = self.backend.create_account(registration).await?;
        self.session.replace(Some(user.clone()))?;
        info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    /// Signs out. The account directory is untouched.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the session key cannot be removed.
    pub fn logout(&mut self) -> StorageResult<()> {
        if let Some(user) = self.session.replace(None)? {
            info!(user_id = %user.id, "User logged out");
        }
        Ok(())
    }

    /// Updates the signed-in user's profile in both the session and the
    /// backend.
    ///
    /// Returns the updated user, or `None` when nobody is signed in.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if either snapshot cannot be persisted.
    /// Both in-memory copies are updated regardless.
    pub fn update_profile(&mut self, update: &ProfileUpdate) -> Result<Option<User>, AuthError> {
        let Some(id) = self.current_user().map(|u| u.id.clone()) else {
            return Ok(None);
        };

        let directory = self.backend.update_account(&id, update);
        let session = self.session.mutate(|session| {
            session.as_mut().map(|user| {
                user.apply(update);
                user.clone()
            })
        });
        directory?;
        let user = session?;

        debug!(user_id = %id, "Updated profile");
        Ok(user)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use cendev_core::UserRole;

    use super::*;
    use crate::storage::MemoryStorage;

    const LATENCY: Duration = Duration::from_millis(1000);

    fn store(storage: &Arc<MemoryStorage>) -> AuthStore {
        let directory = MockDirectory::load(storage.clone(), LATENCY, true).unwrap();
        AuthStore::load(storage.clone(), directory).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_login_success() {
        let storage = Arc::new(MemoryStorage::new());
        let mut auth = store(&storage);
        assert_eq!(auth.state(), SessionState::Anonymous);

        let user = auth.login("seller@example.com", DEMO_PASSWORD).await.unwrap();
        assert_eq!(user.role, UserRole::Seller);
        assert_eq!(auth.current_user(), Some(&user));
        assert!(auth.state().is_authenticated());

        let persisted = storage.read(keys::SESSION_USER).unwrap().unwrap();
        assert!(!persisted.contains("password"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_wrong_password_leaves_anonymous_session() {
        let storage = Arc::new(MemoryStorage::new());
        let mut auth = store(&storage);

        let result = auth.login("buyer@example.com", "wrong").await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
        assert!(!auth.is_authenticated());
        assert!(storage.read(keys::SESSION_USER).unwrap().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_wrong_password_keeps_existing_session() {
        let storage = Arc::new(MemoryStorage::new());
        let mut auth = store(&storage);
        let buyer = auth.login("buyer@example.com", DEMO_PASSWORD).await.unwrap();

        let result = auth.login("seller@example.com", "wrong").await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
        assert_eq!(auth.current_user(), Some(&buyer));
    }

    #[tokio::test(start_paused = true)]
    async fn test_malformed_login_email_is_invalid_credentials() {
        let storage = Arc::new(MemoryStorage::new());
        let mut auth = store(&storage);

        let result = auth.login("buyer", DEMO_PASSWORD).await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_duplicate_registration_keeps_session() {
        let storage = Arc::new(MemoryStorage::new());
        let mut auth = store(&storage);

        let first = auth
            .register(Registration::new("a@x.com", "secret", "A", UserRole::Buyer))
            .await
            .unwrap();
        assert_eq!(first.name, "A");

        let result = auth
            .register(
                Registration::new("a@x.com", "other", "B", UserRole::Seller).with_company("B Corp"),
            )
            .await;
        assert!(matches!(result, Err(AuthError::DuplicateEmail)));
        assert_eq!(auth.current_user().unwrap().name, "A");
        assert_eq!(auth.backend().entries().len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_register_then_login() {
        let storage = Arc::new(MemoryStorage::new());
        let mut auth = store(&storage);

        let registered = auth
            .register(Registration::new("dev@example.com", "hunter22", "Dev", UserRole::Buyer))
            .await
            .unwrap();
        auth.logout().unwrap();

        let user = auth.login("dev@example.com", "hunter22").await.unwrap();
        assert_eq!(user, registered);
    }

    #[tokio::test(start_paused = true)]
    async fn test_logout_removes_session_key_only() {
        let storage = Arc::new(MemoryStorage::new());
        let mut auth = store(&storage);
        auth.login("buyer@example.com", DEMO_PASSWORD).await.unwrap();

        auth.logout().unwrap();
        assert_eq!(auth.state(), SessionState::Anonymous);
        assert!(storage.read(keys::SESSION_USER).unwrap().is_none());
        assert!(storage.read(keys::USER_DIRECTORY).unwrap().is_some());

        auth.logout().unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_update_profile_reaches_session_and_directory() {
        let storage = Arc::new(MemoryStorage::new());
        let mut auth = store(&storage);
        auth.login("buyer@example.com", DEMO_PASSWORD).await.unwrap();

        let update = ProfileUpdate {
            name: Some("Johnny Buyer".to_owned()),
            phone: Some("555-0100".to_owned()),
            ..ProfileUpdate::default()
        };
        let user = auth.update_profile(&update).unwrap().unwrap();
        assert_eq!(user.name, "Johnny Buyer");
        assert_eq!(user.email.as_str(), "buyer@example.com");

        let entry = auth
            .backend()
            .find_user(&UserId::new("user-buyer-1"))
            .unwrap();
        assert_eq!(entry, user);

        let restored = store(&storage);
        assert_eq!(restored.current_user(), Some(&user));
    }

    #[test]
    fn test_update_profile_when_anonymous_is_noop() {
        let storage = Arc::new(MemoryStorage::new());
        let mut auth = store(&storage);
        let update = ProfileUpdate {
            name: Some("Nobody".to_owned()),
            ..ProfileUpdate::default()
        };
        assert!(auth.update_profile(&update).unwrap().is_none());
        assert!(auth.backend().entries().iter().all(|e| e.user.name != "Nobody"));
    }

    #[test]
    fn test_session_for_unknown_user_is_discarded() {
        let storage = Arc::new(MemoryStorage::new());
        let stale = r#"{
            "id": "user-gone",
            "email": "gone@example.com",
            "name": "Gone",
            "role": "buyer",
            "createdAt": "2024-01-01T00:00:00Z"
        }"#;
        storage.write(keys::SESSION_USER, stale).unwrap();

        let auth = store(&storage);
        assert!(!auth.is_authenticated());
        assert!(storage.read(keys::SESSION_USER).unwrap().is_none());
    }
}
