//! Cart store.
//!
//! An ordered list of [`CartLine`]s, at most one per product, persisted under
//! [`keys::CART`] after every change.

use std::num::NonZeroU32;
use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::debug;

use cendev_core::{Price, ProductId};

use crate::checkout::OrderSummary;
use crate::models::{CartLine, Product};
use crate::storage::{PersistenceAdapter, Persisted, StorageResult, keys};

/// The shopper's cart.
#[derive(Debug)]
pub struct CartStore {
    lines: Persisted<Vec<CartLine>>,
}

impl CartStore {
    /// Restores the cart from storage (empty if nothing was saved).
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the adapter fails.
    pub fn load(storage: Arc<dyn PersistenceAdapter>) -> StorageResult<Self> {
        let lines: Persisted<Vec<CartLine>> = Persisted::load(keys::CART, storage)?;
        debug!(lines = lines.get().len(), "Cart restored");
        Ok(Self { lines })
    }

    /// Adds one unit of `product`.
    ///
    /// Increments the existing line for the product, or appends a new line
    /// with quantity 1. Returns the line's new quantity.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the snapshot cannot be written. The cart
    /// keeps the added unit in memory either way.
    pub fn add_to_cart(&mut self, product: &Product) -> StorageResult<u32> {
        let quantity = self.lines.mutate(|lines| {
            if let Some(line) = lines.iter_mut().find(|l| l.product.id == product.id) {
                line.quantity = line.quantity.saturating_add(1);
                line.quantity.get()
            } else {
                lines.push(CartLine::new(product.clone()));
                1
            }
        })?;
        debug!(product_id = %product.id, quantity, "Added to cart");
        Ok(quantity)
    }

    /// Removes the line for `product_id`. Absent products are a no-op.
    ///
    /// Returns whether a line was removed.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the snapshot cannot be written.
    pub fn remove_from_cart(&mut self, product_id: &ProductId) -> StorageResult<bool> {
        let removed = self.lines.mutate(|lines| {
            let before = lines.len();
            lines.retain(|l| l.product.id != *product_id);
            lines.len() != before
        })?;
        debug!(%product_id, removed, "Removed from cart");
        Ok(removed)
    }

    /// Sets the quantity of an existing line.
    ///
    /// A quantity of zero or less removes the line. Products that are not in
    /// the cart are left alone.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the snapshot cannot be written.
    pub fn update_quantity(&mut self, product_id: &ProductId, quantity: i64) -> StorageResult<()> {
        if quantity <= 0 {
            self.remove_from_cart(product_id)?;
            return Ok(());
        }
        let quantity = u32::try_from(quantity)
            .map_or(NonZeroU32::MAX, |q| NonZeroU32::new(q).unwrap_or(NonZeroU32::MIN));

        self.lines.mutate(|lines| {
            if let Some(line) = lines.iter_mut().find(|l| l.product.id == *product_id) {
                line.quantity = quantity;
            }
        })?;
        debug!(%product_id, quantity = quantity.get(), "Updated cart quantity");
        Ok(())
    }

    /// Empties the cart.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the snapshot cannot be written.
    pub fn clear_cart(&mut self) -> StorageResult<()> {
        self.lines.mutate(Vec::clear)?;
        debug!("Cleared cart");
        Ok(())
    }

    /// Total number of units across all lines (not the number of lines).
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.lines.get().iter().map(|l| u64::from(l.quantity())).sum()
    }

    /// Sum of `price * quantity` over all lines.
    ///
    /// Uses the price stored with each line at the time of the call.
    #[must_use]
    pub fn total_price(&self) -> Price {
        self.lines.get().iter().map(CartLine::line_total).sum()
    }

    /// Subtotal, shipping, tax and total for the current cart.
    #[must_use]
    pub fn summary(&self, tax_rate: Decimal) -> OrderSummary {
        OrderSummary::for_lines(self.lines.get(), tax_rate)
    }

    /// The cart lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        self.lines.get()
    }

    /// The line for `product_id`, if present.
    #[must_use]
    pub fn line(&self, product_id: &ProductId) -> Option<&CartLine> {
        self.lines.get().iter().find(|l| l.product.id == *product_id)
    }

    /// Number of distinct products in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.get().len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.get().is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn product(id: &str, cents: i64) -> Product {
        Product::new(id, format!("Product {id}"), Price::from_cents(cents).unwrap())
    }

    fn empty_cart() -> (CartStore, Arc<dyn PersistenceAdapter>) {
        let storage: Arc<dyn PersistenceAdapter> = Arc::new(MemoryStorage::new());
        (CartStore::load(Arc::clone(&storage)).unwrap(), storage)
    }

    #[test]
    fn test_repeated_add_increments_single_line() {
        let (mut cart, _) = empty_cart();
        let mouse = product("5", 7_999);

        for expected in 1..=4 {
            assert_eq!(cart.add_to_cart(&mouse).unwrap(), expected);
        }

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.line(&mouse.id).unwrap().quantity(), 4);
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let (mut cart, _) = empty_cart();
        cart.add_to_cart(&product("3", 100)).unwrap();
        cart.add_to_cart(&product("1", 100)).unwrap();
        cart.add_to_cart(&product("3", 100)).unwrap();

        let ids: Vec<&str> = cart.lines().iter().map(|l| l.product_id().as_str()).collect();
        assert_eq!(ids, ["3", "1"]);
    }

    #[test]
    fn test_update_quantity_zero_or_negative_removes() {
        let (mut cart, storage) = empty_cart();
        let a = product("a", 100);
        let b = product("b", 100);
        cart.add_to_cart(&a).unwrap();
        cart.add_to_cart(&b).unwrap();

        cart.update_quantity(&a.id, 0).unwrap();
        cart.update_quantity(&b.id, -1).unwrap();

        assert!(cart.is_empty());
        assert_eq!(storage.read(keys::CART).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_update_quantity_absent_is_noop() {
        let (mut cart, _) = empty_cart();
        cart.add_to_cart(&product("a", 100)).unwrap();
        cart.update_quantity(&ProductId::new("zzz"), 3).unwrap();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total_items(), 1);
    }

    #[test]
    fn test_update_quantity_saturates_huge_values() {
        let (mut cart, _) = empty_cart();
        let a = product("a", 1);
        cart.add_to_cart(&a).unwrap();
        cart.update_quantity(&a.id, i64::MAX).unwrap();
        assert_eq!(cart.line(&a.id).unwrap().quantity(), u32::MAX);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let (mut cart, _) = empty_cart();
        cart.add_to_cart(&product("a", 100)).unwrap();
        assert!(!cart.remove_from_cart(&ProductId::new("b")).unwrap());
        assert!(cart.remove_from_cart(&ProductId::new("a")).unwrap());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_totals_sum_quantities_not_lines() {
        let (mut cart, _) = empty_cart();
        let keyboard = product("2", 14_999);
        let book = product("6", 4_999);
        cart.add_to_cart(&keyboard).unwrap();
        cart.add_to_cart(&keyboard).unwrap();
        cart.add_to_cart(&book).unwrap();

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.total_items(), 3);
        assert_eq!(cart.total_price(), Price::from_cents(34_997).unwrap());
    }

    #[test]
    fn test_add_twice_then_set_five() {
        let (mut cart, _) = empty_cart();
        let item = product("1", 1_000);
        cart.add_to_cart(&item).unwrap();
        cart.add_to_cart(&item).unwrap();
        cart.update_quantity(&item.id, 5).unwrap();

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.line(&item.id).unwrap().quantity(), 5);
        assert_eq!(cart.total_price(), Price::from_cents(5_000).unwrap());
    }

    #[test]
    fn test_clear_cart() {
        let (mut cart, _) = empty_cart();
        cart.add_to_cart(&product("a", 100)).unwrap();
        cart.clear_cart().unwrap();
        assert!(cart.is_empty());
        assert_eq!(cart.total_price(), Price::ZERO);
    }

    #[test]
    fn test_snapshot_reload_reproduces_lines() {
        let (mut cart, storage) = empty_cart();
        cart.add_to_cart(&product("2", 14_999)).unwrap();
        cart.add_to_cart(&product("7", 19_999)).unwrap();
        cart.update_quantity(&ProductId::new("2"), 3).unwrap();

        let reloaded = CartStore::load(storage).unwrap();
        assert_eq!(reloaded.lines(), cart.lines());
    }
}
