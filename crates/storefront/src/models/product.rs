//! Catalog product types.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use cendev_core::{Price, ProductId};

/// Errors that can occur when constructing a [`Rating`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("rating must be between 0 and 5 (got {0})")]
pub struct RatingError(pub f32);

/// Average review score, `0.0..=5.0`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize)]
#[serde(transparent)]
pub struct Rating(f32);

impl Rating {
    /// Highest possible rating.
    pub const MAX: f32 = 5.0;

    /// Create a rating.
    ///
    /// # Errors
    ///
    /// Returns `RatingError` if the value is outside `0.0..=5.0` or NaN.
    pub fn new(value: f32) -> Result<Self, RatingError> {
        if (0.0..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(RatingError(value))
        }
    }

    /// Create a rating, clamping into range. NaN becomes 0.
    #[must_use]
    pub fn saturating(value: f32) -> Self {
        if value.is_nan() {
            Self(0.0)
        } else {
            Self(value.clamp(0.0, Self::MAX))
        }
    }

    /// The rating value.
    #[must_use]
    pub const fn value(self) -> f32 {
        self.0
    }
}

impl<'de> Deserialize<'de> for Rating {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = f32::deserialize(deserializer)?;
        Self::new(value).map_err(serde::de::Error::custom)
    }
}

/// A catalog entry. Immutable once loaded.
///
/// Field names serialize in camelCase so snapshots keep the storefront's
/// established shape (`originalPrice`, `inStock`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Price,
    /// Pre-discount price, shown struck through.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<Price>,
    /// Image URL.
    pub image: String,
    pub category: String,
    pub rating: Rating,
    /// Number of reviews.
    pub reviews: u32,
    pub in_stock: bool,
    #[serde(default)]
    pub featured: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl Product {
    /// Create an in-stock product with the given price and empty metadata.
    #[must_use]
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: Price) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            price,
            original_price: None,
            image: String::new(),
            category: String::new(),
            rating: Rating::default(),
            reviews: 0,
            in_stock: true,
            featured: false,
            tags: Vec::new(),
        }
    }

    /// Percentage saved against the original price, rounded to the nearest
    /// whole percent. `None` when there is no original price or no saving.
    #[must_use]
    pub fn discount_percent(&self) -> Option<u32> {
        let original = self.original_price?.amount();
        let price = self.price.amount();
        if original <= price || original.is_zero() {
            return None;
        }
        ((original - price) / original * Decimal::ONE_HUNDRED)
            .round()
            .to_u32()
    }
}
