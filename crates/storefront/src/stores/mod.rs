//! Cart and wishlist state containers.
//!
//! Both stores load their snapshot once at construction and rewrite it in
//! full after every mutation through [`crate::storage::Persisted`].

pub mod cart;
pub mod wishlist;

pub use cart::CartStore;
pub use wishlist::WishlistStore;
