//! Wishlist commands.

use tracing::info;

use cendev_core::ProductId;
use cendev_storefront::Storefront;

/// Show saved products.
pub fn show(storefront: &Storefront) {
    let wishlist = storefront.wishlist();
    if wishlist.is_empty() {
        info!("Your wishlist is empty");
        return;
    }
    for product in wishlist.items() {
        info!("  [{}] {} - {}", product.id, product.name, product.price);
    }
}

/// Save a product.
///
/// # Errors
///
/// Returns an error if the product does not exist or the wishlist cannot be
/// saved.
pub fn add(storefront: &mut Storefront, id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let product = super::find_product(storefront, id)?;
    if storefront.wishlist_mut().add_to_wishlist(&product)? {
        info!("Saved {} to wishlist", product.name);
    } else {
        info!("{} is already in the wishlist", product.name);
    }
    Ok(())
}

/// Remove a saved product.
///
/// # Errors
///
/// Returns an error if the wishlist cannot be saved.
pub fn remove(storefront: &mut Storefront, id: &str) -> Result<(), Box<dyn std::error::Error>> {
    if storefront
        .wishlist_mut()
        .remove_from_wishlist(&ProductId::new(id))?
    {
        info!("Removed product {id} from wishlist");
    } else {
        info!("Product {id} is not in the wishlist");
    }
    Ok(())
}

/// Save or unsave a product.
///
/// # Errors
///
/// Returns an error if the product does not exist or the wishlist cannot be
/// saved.
pub fn toggle(storefront: &mut Storefront, id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let product = super::find_product(storefront, id)?;
    if storefront.wishlist_mut().toggle(&product)? {
        info!("Saved {} to wishlist", product.name);
    } else {
        info!("Removed {} from wishlist", product.name);
    }
    Ok(())
}

/// Empty the wishlist.
///
/// # Errors
///
/// Returns an error if the wishlist cannot be saved.
pub fn clear(storefront: &mut Storefront) -> Result<(), Box<dyn std::error::Error>> {
    storefront.wishlist_mut().clear_wishlist()?;
    info!("Wishlist cleared");
    Ok(())
}
