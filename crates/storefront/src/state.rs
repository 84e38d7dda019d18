//! Application state shared by front ends.

use std::sync::Arc;

use tracing::debug;

use crate::catalog::Catalog;
use crate::checkout::OrderSummary;
use crate::config::StorefrontConfig;
use crate::error::Result;
use crate::services::auth::{AuthStore, MockDirectory};
use crate::storage::{FileStorage, MemoryStorage, PersistenceAdapter};
use crate::stores::{CartStore, WishlistStore};

/// Everything a storefront session needs: the catalog, the three stores and
/// the storage they share.
#[derive(Debug)]
pub struct Storefront {
    config: StorefrontConfig,
    storage: Arc<dyn PersistenceAdapter>,
    catalog: Catalog,
    cart: CartStore,
    wishlist: WishlistStore,
    auth: AuthStore,
}

impl Storefront {
    /// Open a storefront using the storage named by `config`.
    ///
    /// Snapshots go to `config.data_dir` when set, otherwise to memory.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be created or a
    /// snapshot cannot be read.
    pub fn open(config: StorefrontConfig) -> Result<Self> {
        let storage: Arc<dyn PersistenceAdapter> = match &config.data_dir {
            Some(dir) => Arc::new(FileStorage::open(dir)?),
            None => Arc::new(MemoryStorage::new()),
        };
        Self::with_storage(config, storage)
    }

    /// Open a storefront on an existing storage adapter.
    ///
    /// # Errors
    ///
    /// Returns an error if a snapshot cannot be read, or the demo accounts
    /// cannot be seeded.
    pub fn with_storage(
        config: StorefrontConfig,
        storage: Arc<dyn PersistenceAdapter>,
    ) -> Result<Self> {
        let directory = MockDirectory::load(
            Arc::clone(&storage),
            config.auth_latency,
            config.seed_demo_users,
        )?;
        let auth = AuthStore::load(Arc::clone(&storage), directory)?;
        let cart = CartStore::load(Arc::clone(&storage))?;
        let wishlist = WishlistStore::load(Arc::clone(&storage))?;

        debug!(
            cart_lines = cart.len(),
            wishlist_items = wishlist.len(),
            authenticated = auth.is_authenticated(),
            "Opened storefront"
        );

        Ok(Self {
            config,
            storage,
            catalog: Catalog::demo(),
            cart,
            wishlist,
            auth,
        })
    }

    /// Replace the catalog.
    #[must_use]
    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub const fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    /// Get a reference to the shared storage adapter.
    #[must_use]
    pub fn storage(&self) -> &dyn PersistenceAdapter {
        self.storage.as_ref()
    }

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub const fn cart(&self) -> &CartStore {
        &self.cart
    }

    pub const fn cart_mut(&mut self) -> &mut CartStore {
        &mut self.cart
    }

    #[must_use]
    pub const fn wishlist(&self) -> &WishlistStore {
        &self.wishlist
    }

    pub const fn wishlist_mut(&mut self) -> &mut WishlistStore {
        &mut self.wishlist
    }

    #[must_use]
    pub const fn auth(&self) -> &AuthStore {
        &self.auth
    }

    pub const fn auth_mut(&mut self) -> &mut AuthStore {
        &mut self.auth
    }

    /// The cart's order summary at the configured tax rate.
    #[must_use]
    pub fn order_summary(&self) -> OrderSummary {
        self.cart.summary(self.config.tax_rate)
    }

    /// Empty the cart and wishlist and sign out. Accounts are kept.
    ///
    /// # Errors
    ///
    /// Returns the first storage error; every step is attempted regardless.
    pub fn reset(&mut self) -> Result<()> {
        let cart = self.cart.clear_cart();
        let wishlist = self.wishlist.clear_wishlist();
        let auth = self.auth.logout();
        cart?;
        wishlist?;
        auth?;
        Ok(())
    }
}
