//! Unified error handling.
//!
//! Each concern has its own error enum; [`StorefrontError`] wraps them for
//! front ends that only need to report a failure.

use thiserror::Error;

use crate::config::ConfigError;
use crate::services::auth::AuthError;
use crate::storage::StorageError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// A snapshot could not be read or written.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),
}

impl StorefrontError {
    /// Whether the error came from bad user input rather than the
    /// environment (wrong password, taken email, malformed address).
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::Auth(
                AuthError::InvalidCredentials | AuthError::DuplicateEmail | AuthError::InvalidEmail(_)
            )
        )
    }
}

/// Result type alias using `StorefrontError`.
pub type Result<T> = std::result::Result<T, StorefrontError>;
