//! Cart line type.

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use cendev_core::{Price, ProductId};

use super::product::Product;

/// A product in the cart together with how many units are wanted.
///
/// Serialized flat (product fields plus `quantity`). The quantity is a
/// `NonZeroU32`, so a zero quantity can neither be stored nor loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(flatten)]
    pub product: Product,
    pub quantity: NonZeroU32,
}

impl CartLine {
    /// A new line holding a single unit.
    #[must_use]
    pub const fn new(product: Product) -> Self {
        Self {
            product,
            quantity: NonZeroU32::MIN,
        }
    }

    /// The product identifier this line is keyed by.
    #[must_use]
    pub const fn product_id(&self) -> &ProductId {
        &self.product.id
    }

    /// Units as a plain integer.
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity.get()
    }

    /// `price * quantity`, using the price currently held by the line.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price.times(self.quantity.get())
    }
}
