//! In-process account directory.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, info};

use cendev_core::{Email, Password, UserId, UserRole};

use super::{AuthBackend, AuthError};
use crate::models::{DirectoryEntry, ProfileUpdate, Registration, User};
use crate::storage::{PersistenceAdapter, Persisted, StorageResult, keys};

/// Password shared by the demo accounts.
pub const DEMO_PASSWORD: &str = "password123";

/// Account directory kept in a single storage snapshot.
///
/// Each call to [`AuthBackend::authenticate`] or
/// [`AuthBackend::create_account`] waits for `latency` before answering, to
/// behave like a remote identity service.
#[derive(Debug)]
pub struct MockDirectory {
    entries: Persisted<Vec<DirectoryEntry>>,
    latency: Duration,
}

impl MockDirectory {
    /// Restores the directory from storage.
    ///
    /// With `seed_demo_users` set, an absent directory key is populated with
    /// [`demo_users`]. A directory that already exists is never reseeded,
    /// even if it is empty.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the adapter fails.
    pub fn load(
        storage: Arc<dyn PersistenceAdapter>,
        latency: Duration,
        seed_demo_users: bool,
    ) -> StorageResult<Self> {
        let entries = if seed_demo_users {
            Persisted::load_or_else(keys::USER_DIRECTORY, storage, || {
                let users = demo_users();
                info!(count = users.len(), "Seeded demo users");
                users
            })?
        } else {
            Persisted::load(keys::USER_DIRECTORY, storage)?
        };
        debug!(count = entries.get().len(), "Loaded user directory");
        Ok(Self { entries, latency })
    }

    /// Every directory entry in registration order.
    #[must_use]
    pub fn entries(&self) -> &[DirectoryEntry] {
        self.entries.get()
    }

    /// The simulated round-trip time.
    #[must_use]
    pub const fn latency(&self) -> Duration {
        self.latency
    }

    fn contains_email(&self, email: &Email) -> bool {
        self.entries().iter().any(|e| e.user.email == *email)
    }
}

impl AuthBackend for MockDirectory {
    async fn authenticate(&self, email: &str, password: &str) -> Result<User, AuthError> {
        tokio::time::sleep(self.latency).await;

        self.entries()
            .iter()
            .find(|e| e.user.email == *email && e.password.matches(password))
            .map(DirectoryEntry::to_user)
            .ok_or(AuthError::InvalidCredentials)
    }

    async fn create_account(&mut self, registration: Registration) -> Result<User, AuthError> {
        tokio::time::sleep(self.latency).await;

        let email = Email::parse(&registration.email)?;
        if self.contains_email(&email) {
            return Err(AuthError::DuplicateEmail);
        }

        let entry = DirectoryEntry {
            user: User {
                id: UserId::generate(),
                email,
                name: registration.name,
                role: registration.role,
                avatar: None,
                company: registration.company,
                phone: None,
                address: None,
                created_at: Utc::now(),
            },
            password: registration.password,
        };
        let user = entry.to_user();
        self.entries.mutate(|entries| entries.push(entry))?;
        Ok(user)
    }

    fn update_account(
        &mut self,
        id: &UserId,
        update: &ProfileUpdate,
    ) -> Result<Option<User>, AuthError> {
        let updated = self.entries.mutate(|entries| {
            entries.iter_mut().find(|e| e.user.id == *id).map(|entry| {
                entry.user.apply(update);
                entry.to_user()
            })
        })?;
        Ok(updated)
    }

    fn find_user(&self, id: &UserId) -> Option<User> {
        self.entries()
            .iter()
            .find(|e| e.user.id == *id)
            .map(DirectoryEntry::to_user)
    }
}

/// The two demo accounts: a buyer and a seller, both using
/// [`DEMO_PASSWORD`].
#[must_use]
pub fn demo_users() -> Vec<DirectoryEntry> {
    let now = Utc::now();
    let demo = |id: &str, email: &str, name: &str, role: UserRole, company: Option<&str>| {
        Email::parse(email).ok().map(|email| DirectoryEntry {
            user: User {
                id: UserId::new(id),
                email,
                name: name.to_owned(),
                role,
                avatar: None,
                company: company.map(str::to_owned),
                phone: None,
                address: None,
                created_at: now,
            },
            password: Password::new(DEMO_PASSWORD),
        })
    };

    [
        demo(
            "user-buyer-1",
            "buyer@example.com",
            "John Buyer",
            UserRole::Buyer,
            None,
        ),
        demo(
            "user-seller-1",
            "seller@example.com",
            "Jane Seller",
            UserRole::Seller,
            Some("Tech Solutions Inc."),
        ),
    ]
    .into_iter()
    .flatten()
    .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn directory(storage: &Arc<MemoryStorage>) -> MockDirectory {
        MockDirectory::load(storage.clone(), Duration::from_millis(1000), true).unwrap()
    }

    #[test]
    fn test_demo_users() {
        let users = demo_users();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].user.role, UserRole::Buyer);
        assert_eq!(users[1].user.company.as_deref(), Some("Tech Solutions Inc."));
        assert!(users.iter().all(|u| u.password.matches(DEMO_PASSWORD)));
    }

    #[test]
    fn test_seeding_is_idempotent() {
        let storage = Arc::new(MemoryStorage::new());
        let first = directory(&storage);
        let stored = storage.read(keys::USER_DIRECTORY).unwrap();

        let second = directory(&storage);
        assert_eq!(first.entries(), second.entries());
        assert_eq!(storage.read(keys::USER_DIRECTORY).unwrap(), stored);
    }

    #[test]
    fn test_existing_empty_directory_is_not_reseeded() {
        let storage = Arc::new(MemoryStorage::new());
        storage.write(keys::USER_DIRECTORY, "[]").unwrap();
        assert!(directory(&storage).entries().is_empty());
    }

    #[test]
    fn test_seeding_disabled() {
        let storage = Arc::new(MemoryStorage::new());
        let directory = MockDirectory::load(storage, Duration::ZERO, false).unwrap();
        assert!(directory.entries().is_empty());
    }

    #[test]
    fn test_seeding_after_unseeded_run() {
        let storage = Arc::new(MemoryStorage::new());
        let unseeded = MockDirectory::load(storage.clone(), Duration::ZERO, false).unwrap();
        assert!(unseeded.entries().is_empty());
        assert!(storage.read(keys::USER_DIRECTORY).unwrap().is_none());

        let seeded = MockDirectory::load(storage.clone(), Duration::ZERO, true).unwrap();
        assert_eq!(seeded.entries().len(), 2);
        assert!(storage.read(keys::USER_DIRECTORY).unwrap().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_authenticate_waits_for_latency() {
        let storage = Arc::new(MemoryStorage::new());
        let directory = directory(&storage);

        let started = tokio::time::Instant::now();
        let user = directory
            .authenticate("buyer@example.com", DEMO_PASSWORD)
            .await
            .unwrap();
        assert!(started.elapsed() >= Duration::from_millis(1000));
        assert_eq!(user.id, "user-buyer-1");
    }

    #[tokio::test(start_paused = true)]
    async fn test_authenticate_rejects_wrong_password() {
        let storage = Arc::new(MemoryStorage::new());
        let directory = directory(&storage);

        let result = directory.authenticate("buyer@example.com", "nope").await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_create_account_appends_entry() {
        let storage = Arc::new(MemoryStorage::new());
        let mut directory = directory(&storage);

        let user = directory
            .create_account(Registration::new("new@example.com", "secret", "New", UserRole::Buyer))
            .await
            .unwrap();
        assert!(user.id.as_str().starts_with(UserId::PREFIX));
        assert_eq!(directory.entries().len(), 3);
        assert_eq!(directory.entries()[2].user, user);

        let reloaded = MockDirectory::load(storage, Duration::ZERO, true).unwrap();
        assert_eq!(reloaded.entries().len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_create_account_rejects_invalid_email() {
        let storage = Arc::new(MemoryStorage::new());
        let mut directory = directory(&storage);

        let result = directory
            .create_account(Registration::new("not-an-email", "secret", "X", UserRole::Buyer))
            .await;
        assert!(matches!(result, Err(AuthError::InvalidEmail(_))));
        assert_eq!(directory.entries().len(), 2);
    }

    #[test]
    fn test_update_account_unknown_id() {
        let storage = Arc::new(MemoryStorage::new());
        let mut directory = directory(&storage);
        let update = ProfileUpdate {
            name: Some("Ghost".to_owned()),
            ..ProfileUpdate::default()
        };
        assert!(
            directory
                .update_account(&UserId::new("user-missing"), &update)
                .unwrap()
                .is_none()
        );
    }
}
