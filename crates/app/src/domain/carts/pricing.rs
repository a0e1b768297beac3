//! Cart pricing.
//!
//! Two discount tiers exist and they never stack: a cart over the value threshold
//! gets the value discount even when it also qualifies for the quantity discount.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::domain::carts::models::{Cart, Price};

/// Carts holding more than this many items get [`QUANTITY_DISCOUNT_PERCENT`].
pub const QUANTITY_DISCOUNT_MIN_ITEMS: usize = 3;

/// Discount for carts holding more than [`QUANTITY_DISCOUNT_MIN_ITEMS`] items.
pub const QUANTITY_DISCOUNT_PERCENT: u32 = 5;

/// Carts whose total exceeds this amount get [`VALUE_DISCOUNT_PERCENT`].
pub const VALUE_DISCOUNT_THRESHOLD: Decimal = Decimal::from_parts(5000, 0, 0, false, 0);

/// Discount for carts whose total exceeds [`VALUE_DISCOUNT_THRESHOLD`].
pub const VALUE_DISCOUNT_PERCENT: u32 = 10;

/// Decimal places kept in a final price.
const FINAL_PRICE_SCALE: u32 = 2;

/// A cart's total or discount does not fit in a [`Decimal`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("cart total exceeds the supported amount range")]
pub struct PriceOverflow;

/// Computes a price quote from the cart's current items.
///
/// # Errors
///
/// Returns [`PriceOverflow`] when the item prices sum past [`Decimal::MAX`], or
/// the discount cannot be computed at that magnitude.
pub fn price_cart(cart: &Cart) -> Result<Price, PriceOverflow> {
    let total_price = cart
        .items
        .iter()
        .try_fold(Decimal::ZERO, |total, item| total.checked_add(item.price))
        .ok_or(PriceOverflow)?;

    let discount_percent = discount_percent(cart.items.len(), total_price);

    Ok(Price {
        cart_id: cart.id,
        total_price,
        discount_percent,
        final_price: apply_discount(total_price, discount_percent)?,
    })
}

/// Selects the discount tier for a cart with `item_count` items totalling `total_price`.
#[must_use]
pub fn discount_percent(item_count: usize, total_price: Decimal) -> u32 {
    if total_price > VALUE_DISCOUNT_THRESHOLD {
        VALUE_DISCOUNT_PERCENT
    } else if item_count > QUANTITY_DISCOUNT_MIN_ITEMS {
        QUANTITY_DISCOUNT_PERCENT
    } else {
        0
    }
}

/// Takes `percent` off `total`, discarding anything below a cent.
///
/// # Errors
///
/// Returns [`PriceOverflow`] when `total × percent` does not fit in a [`Decimal`].
pub fn apply_discount(total: Decimal, percent: u32) -> Result<Decimal, PriceOverflow> {
    let discount = total
        .checked_mul(Decimal::from(percent))
        .and_then(|scaled| scaled.checked_div(Decimal::ONE_HUNDRED))
        .ok_or(PriceOverflow)?;

    total
        .checked_sub(discount)
        .map(|discounted| discounted.trunc_with_scale(FINAL_PRICE_SCALE))
        .ok_or(PriceOverflow)
}
