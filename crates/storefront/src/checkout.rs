//! Order summary figures shown next to the cart.

use rust_decimal::Decimal;
use serde::Serialize;

use cendev_core::Price;

use crate::models::CartLine;

/// Default sales tax rate (10%).
pub const DEFAULT_TAX_RATE: Decimal = Decimal::from_parts(10, 0, 0, false, 2);

/// Subtotal, shipping, tax and total for a set of cart lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    /// Units across all lines.
    pub item_count: u64,
    pub subtotal: Price,
    /// Shipping is free on every order.
    pub shipping: Price,
    /// `subtotal * tax_rate`, rounded to cents.
    pub tax: Price,
    pub total: Price,
}

impl OrderSummary {
    /// Computes the summary for `lines` at `tax_rate`.
    #[must_use]
    pub fn for_lines(lines: &[CartLine], tax_rate: Decimal) -> Self {
        let subtotal: Price = lines.iter().map(CartLine::line_total).sum();
        let shipping = Price::ZERO;
        let tax = subtotal.scaled(tax_rate);
        Self {
            item_count: lines.iter().map(|l| u64::from(l.quantity())).sum(),
            subtotal,
            shipping,
            tax,
            total: subtotal + shipping + tax,
        }
    }

    /// Whether the shipping line reads "FREE".
    #[must_use]
    pub fn has_free_shipping(&self) -> bool {
        self.shipping == Price::ZERO
    }
}
