//! Wishlist store.

use std::sync::Arc;

use tracing::debug;

use cendev_core::ProductId;

use crate::models::Product;
use crate::storage::{PersistenceAdapter, Persisted, StorageResult, keys};

/// Saved products, unique by identifier, in the order they were saved.
#[derive(Debug)]
pub struct WishlistStore {
    items: Persisted<Vec<Product>>,
}

impl WishlistStore {
    /// Restores the wishlist from storage (empty if nothing was saved).
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the adapter fails.
    pub fn load(storage: Arc<dyn PersistenceAdapter>) -> StorageResult<Self> {
        Ok(Self {
            items: Persisted::load(keys::WISHLIST, storage)?,
        })
    }

    /// Saves `product`. Adding a product that is already saved changes
    /// nothing. Returns whether the product was newly added.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the snapshot cannot be written.
    pub fn add_to_wishlist(&mut self, product: &Product) -> StorageResult<bool> {
        let added = self.items.mutate(|items| {
            if items.iter().any(|p| p.id == product.id) {
                false
            } else {
                items.push(product.clone());
                true
            }
        })?;
        debug!(product_id = %product.id, added, "Added to wishlist");
        Ok(added)
    }

    /// Removes the product if saved. Returns whether it was present.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the snapshot cannot be written.
    pub fn remove_from_wishlist(&mut self, product_id: &ProductId) -> StorageResult<bool> {
        let removed = self.items.mutate(|items| {
            let before = items.len();
            items.retain(|p| p.id != *product_id);
            items.len() != before
        })?;
        debug!(%product_id, removed, "Removed from wishlist");
        Ok(removed)
    }

    /// Adds the product if absent, removes it if present. Returns whether the
    /// product is saved afterwards.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the snapshot cannot be written.
    pub fn toggle(&mut self, product: &Product) -> StorageResult<bool> {
        if self.is_in_wishlist(&product.id) {
            self.remove_from_wishlist(&product.id)?;
            Ok(false)
        } else {
            self.add_to_wishlist(product)?;
            Ok(true)
        }
    }

    /// Whether the product is saved.
    #[must_use]
    pub fn is_in_wishlist(&self, product_id: &ProductId) -> bool {
        self.items.get().iter().any(|p| p.id == *product_id)
    }

    /// Removes every saved product.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the snapshot cannot be written.
    pub fn clear_wishlist(&mut self) -> StorageResult<()> {
        self.items.mutate(Vec::clear)?;
        debug!("Cleared wishlist");
        Ok(())
    }

    /// Saved products in the order they were added.
    #[must_use]
    pub fn items(&self) -> &[Product] {
        self.items.get()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.get().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.get().is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use cendev_core::Price;

    use super::*;
    use crate::storage::MemoryStorage;

    fn product(id: &str) -> Product {
        Product::new(id, "Headphones", Price::from_cents(27_999).unwrap())
    }

    fn empty() -> (WishlistStore, Arc<dyn PersistenceAdapter>) {
        let storage: Arc<dyn PersistenceAdapter> = Arc::new(MemoryStorage::new());
        (WishlistStore::load(Arc::clone(&storage)).unwrap(), storage)
    }

    #[test]
    fn test_add_is_idempotent() {
        let (mut wishlist, _) = empty();
        assert!(wishlist.add_to_wishlist(&product("3")).unwrap());
        assert!(!wishlist.add_to_wishlist(&product("3")).unwrap());
        assert_eq!(wishlist.len(), 1);
    }

    #[test]
    fn test_membership() {
        let (mut wishlist, _) = empty();
        let id = ProductId::new("3");
        assert!(!wishlist.is_in_wishlist(&id));
        wishlist.add_to_wishlist(&product("3")).unwrap();
        assert!(wishlist.is_in_wishlist(&id));
        assert!(wishlist.remove_from_wishlist(&id).unwrap());
        assert!(!wishlist.is_in_wishlist(&id));
        assert!(!wishlist.remove_from_wishlist(&id).unwrap());
    }

    #[test]
    fn test_toggle() {
        let (mut wishlist, _) = empty();
        assert!(wishlist.toggle(&product("1")).unwrap());
        assert!(!wishlist.toggle(&product("1")).unwrap());
        assert!(wishlist.is_empty());
    }

    #[test]
    fn test_clear_and_persist() {
        let (mut wishlist, storage) = empty();
        wishlist.add_to_wishlist(&product("1")).unwrap();
        wishlist.add_to_wishlist(&product("2")).unwrap();

        let reloaded = WishlistStore::load(Arc::clone(&storage)).unwrap();
        assert_eq!(reloaded.items(), wishlist.items());

        wishlist.clear_wishlist().unwrap();
        assert!(wishlist.is_empty());
        assert_eq!(storage.read(keys::WISHLIST).unwrap().as_deref(), Some("[]"));
    }
}
