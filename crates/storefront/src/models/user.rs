//! User domain types.
//!
//! [`User`] is the projection callers see and the session persists.
//! [`DirectoryEntry`] is the mock directory record; it adds the credential
//! and never leaves the auth module.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cendev_core::{Email, Password, UserId, UserRole};

/// A storefront account as exposed to the rest of the application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Login email, unique across the directory.
    pub email: Email,
    /// Display name.
    pub name: String,
    pub role: UserRole,
    /// Avatar image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// When the account was registered.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Applies a profile update in place.
    ///
    /// Only the fields present in `update` change.
    pub fn apply(&mut self, update: &ProfileUpdate) {
        if let Some(name) = &update.name {
            self.name.clone_from(name);
        }
        if let Some(avatar) = &update.avatar {
            self.avatar = Some(avatar.clone());
        }
        if let Some(company) = &update.company {
            self.company = Some(company.clone());
        }
        if let Some(phone) = &update.phone {
            self.phone = Some(phone.clone());
        }
        if let Some(address) = &update.address {
            self.address = Some(address.clone());
        }
    }
}

/// A mock directory record: the public projection plus its credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    #[serde(flatten)]
    pub user: User,
    pub password: Password,
}

impl DirectoryEntry {
    /// Strips the credential.
    #[must_use]
    pub fn to_user(&self) -> User {
        self.user.clone()
    }
}

/// Fields a signed-in user may change about themselves.
///
/// Email, ID, role and creation time are deliberately absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub avatar: Option<String>,
    pub company: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl ProfileUpdate {
    /// Whether the update changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.avatar.is_none()
            && self.company.is_none()
            && self.phone.is_none()
            && self.address.is_none()
    }
}

/// Input for a new account.
#[derive(Debug, Clone)]
pub struct Registration {
    pub email: String,
    pub password: Password,
    pub name: String,
    pub role: UserRole,
    pub company: Option<String>,
}

impl Registration {
    /// Creates a registration without a company.
    #[must_use]
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
        name: impl Into<String>,
        role: UserRole,
    ) -> Self {
        Self {
            email: email.into(),
            password: Password::new(password),
            name: name.into(),
            role,
            company: None,
        }
    }

    /// Sets the company name (typically for sellers).
    #[must_use]
    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: UserId::new("user-buyer-1"),
            email: Email::parse("buyer@example.com").unwrap(),
            name: "John Buyer".to_owned(),
            role: UserRole::Buyer,
            avatar: None,
            company: None,
            phone: None,
            address: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_apply_merges_only_present_fields() {
        let mut user = user();
        user.phone = Some("555-0100".to_owned());

        user.apply(&ProfileUpdate {
            name: Some("John B.".to_owned()),
            address: Some("1 Main St".to_owned()),
            ..ProfileUpdate::default()
        });

        assert_eq!(user.name, "John B.");
        assert_eq!(user.address.as_deref(), Some("1 Main St"));
        assert_eq!(user.phone.as_deref(), Some("555-0100"));
        assert_eq!(user.email.as_str(), "buyer@example.com");
    }

    #[test]
    fn test_directory_entry_is_flat_and_projection_has_no_password() {
        let entry = DirectoryEntry {
            user: user(),
            password: Password::new("password123"),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["email"], "buyer@example.com");
        assert_eq!(json["password"], "password123");
        assert!(json.get("createdAt").is_some());

        let projection = serde_json::to_value(entry.to_user()).unwrap();
        assert!(projection.get("password").is_none());
    }

    #[test]
    fn test_directory_entry_roundtrip() {
        let entry = DirectoryEntry {
            user: user(),
            password: Password::new("pw"),
        };
        let json = serde_json::to_string(&entry).unwrap();
        let back: DirectoryEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }

    #[test]
    fn test_profile_update_is_empty() {
        assert!(ProfileUpdate::default().is_empty());
        let update = ProfileUpdate {
            phone: Some(String::new()),
            ..ProfileUpdate::default()
        };
        assert!(!update.is_empty());
    }
}
