//! Domain models for the storefront.
//!
//! These types are what the stores hold and what their snapshots serialize.

pub mod cart;
pub mod product;
pub mod user;

pub use cart::CartLine;
pub use product::{Product, Rating, RatingError};
pub use user::{DirectoryEntry, ProfileUpdate, Registration, User};
