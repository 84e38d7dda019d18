//! Catalog browsing.

use tracing::info;

use cendev_storefront::models::Product;
use cendev_storefront::{ProductQuery, Storefront};

fn print_product(product: &Product) {
    let discount = product
        .discount_percent()
        .map(|pct| format!(" (-{pct}%, was {})", product.original_price.unwrap_or_default()))
        .unwrap_or_default();
    info!(
        "  [{}] {} - {}{} | {} | {:.1} stars ({} reviews)",
        product.id,
        product.name,
        product.price,
        discount,
        product.category,
        product.rating.value(),
        product.reviews
    );
}

/// List products matching `query`.
pub fn list(storefront: &Storefront, query: &ProductQuery) {
    let products = storefront.catalog().query(query);
    info!("{} product(s)", products.len());
    for product in products {
        print_product(product);
    }
}

/// Show one product with its related items.
///
/// # Errors
///
/// Returns an error if the product does not exist.
pub fn show(storefront: &Storefront, id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let product = super::find_product(storefront, id)?;
    print_product(&product);
    info!("  {}", product.description);
    if !product.tags.is_empty() {
        info!("  Tags: {}", product.tags.join(", "));
    }
    if storefront.wishlist().is_in_wishlist(&product.id) {
        info!("  In your wishlist");
    }
    if let Some(line) = storefront.cart().line(&product.id) {
        info!("  In your cart (x{})", line.quantity());
    }

    let related = storefront.catalog().related(&product);
    if !related.is_empty() {
        info!("Related products:");
        for product in related {
            print_product(product);
        }
    }
    Ok(())
}

/// List categories with product counts.
pub fn categories(storefront: &Storefront) {
    for category in storefront.catalog().categories() {
        info!("  {} ({}) - {}", category.name, category.id, category.count);
    }
}
