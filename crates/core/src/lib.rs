//! Cendev Core - Shared types library.
//!
//! This crate provides common types used across all Cendev components:
//! - `storefront` - Cart, wishlist and session state with persistence
//! - `cli` - Command-line front end driving the storefront state
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no async
//! runtime. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, credentials and roles

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
