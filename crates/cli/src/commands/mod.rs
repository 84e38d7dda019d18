//! Subcommand implementations.

pub mod account;
pub mod cart;
pub mod products;
pub mod wishlist;

use cendev_core::ProductId;
use cendev_storefront::Storefront;
use cendev_storefront::models::Product;

/// Look a product up in the catalog, or fail with a readable message.
fn find_product(storefront: &Storefront, id: &str) -> Result<Product, Box<dyn std::error::Error>> {
    storefront
        .catalog()
        .get(&ProductId::new(id))
        .cloned()
        .ok_or_else(|| format!("Product not found: {id}").into())
}
