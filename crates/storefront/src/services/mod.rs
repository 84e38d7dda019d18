//! Business logic services for the storefront.
//!
//! - `auth` - Session state and the account directory behind it

pub mod auth;
