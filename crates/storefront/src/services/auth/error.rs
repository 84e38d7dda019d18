//! Authentication error types.

use thiserror::Error;

use crate::storage::StorageError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No directory entry matches the email and password pair.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Registration with an email that already has an account.
    #[error("an account with this email already exists")]
    DuplicateEmail,

    /// Registration with a malformed email.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] cendev_core::EmailError),

    /// The session or directory snapshot could not be persisted.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}
