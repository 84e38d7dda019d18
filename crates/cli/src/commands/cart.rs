//! Cart commands.

use tracing::info;

use cendev_core::ProductId;
use cendev_storefront::Storefront;

/// Show cart lines and the order summary.
pub fn show(storefront: &Storefront) {
    let cart = storefront.cart();
    if cart.is_empty() {
        info!("Your cart is empty");
        return;
    }

    for line in cart.lines() {
        info!(
            "  [{}] {} x{} @ {} = {}",
            line.product_id(),
            line.product.name,
            line.quantity(),
            line.product.price,
            line.line_total()
        );
    }

    let summary = storefront.order_summary();
    info!("Items:    {}", summary.item_count);
    info!("Subtotal: {}", summary.subtotal);
    if summary.has_free_shipping() {
        info!("Shipping: FREE");
    } else {
        info!("Shipping: {}", summary.shipping);
    }
    info!("Tax:      {}", summary.tax);
    info!("Total:    {}", summary.total);
}

/// Add one unit of a product.
///
/// # Errors
///
/// Returns an error if the product does not exist or the cart cannot be saved.
pub fn add(storefront: &mut Storefront, id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let product = super::find_product(storefront, id)?;
    let quantity = storefront.cart_mut().add_to_cart(&product)?;
    info!("Added {} to cart (quantity {quantity})", product.name);
    Ok(())
}

/// Remove a product from the cart.
///
/// # Errors
///
/// Returns an error if the cart cannot be saved.
pub fn remove(storefront: &mut Storefront, id: &str) -> Result<(), Box<dyn std::error::Error>> {
    if storefront.cart_mut().remove_from_cart(&ProductId::new(id))? {
        info!("Removed product {id} from cart");
    } else {
        info!("Product {id} is not in the cart");
    }
    Ok(())
}

/// Set a product's quantity.
///
/// # Errors
///
/// Returns an error if the cart cannot be saved.
pub fn set_quantity(
    storefront: &mut Storefront,
    id: &str,
    quantity: i64,
) -> Result<(), Box<dyn std::error::Error>> {
    let product_id = ProductId::new(id);
    storefront.cart_mut().update_quantity(&product_id, quantity)?;
    match storefront.cart().line(&product_id) {
        Some(line) => info!("Product {id} quantity is now {}", line.quantity()),
        None => info!("Product {id} is not in the cart"),
    }
    Ok(())
}

/// Empty the cart.
///
/// # Errors
///
/// Returns an error if the cart cannot be saved.
pub fn clear(storefront: &mut Storefront) -> Result<(), Box<dyn std::error::Error>> {
    storefront.cart_mut().clear_cart()?;
    info!("Cart cleared");
    Ok(())
}
