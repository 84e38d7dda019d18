//! Cendev storefront library.
//!
//! Holds the state behind the storefront: a product [`catalog`], the cart,
//! wishlist and session [`stores`](crate::stores) and the [`storage`] they
//! persist to. Front ends open a [`Storefront`] and drive it.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod state;
pub mod storage;
pub mod stores;

pub use catalog::{Catalog, ProductQuery, SortOrder};
pub use checkout::OrderSummary;
pub use config::StorefrontConfig;
pub use error::{Result, StorefrontError};
pub use services::auth::{AuthError, AuthStore, SessionState};
pub use state::Storefront;
