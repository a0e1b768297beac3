//! Cart Models

use rust_decimal::Decimal;

use crate::ids::TypedId;

/// Cart ID
pub type CartId = TypedId<Cart>;

/// Cart Item ID
pub type CartItemId = TypedId<CartItem>;

/// Cart Model
#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    pub id: CartId,
    pub items: Vec<CartItem>,
}

impl Cart {
    /// A cart holding no items.
    #[must_use]
    pub fn empty(id: CartId) -> Self {
        Self {
            id,
            items: Vec::new(),
        }
    }
}

/// CartItem Model
#[derive(Debug, Clone, PartialEq)]
pub struct CartItem {
    pub id: CartItemId,
    pub cart_id: CartId,
    pub product: String,
    pub price: Decimal,
}

/// New Cart Item Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewCartItem {
    pub cart_id: CartId,
    pub product: String,
    pub price: Decimal,
}

/// Price quote computed from a cart's current items. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Price {
    pub cart_id: CartId,

    /// Sum of all item prices.
    pub total_price: Decimal,

    /// Applied discount in percent points (0, 5 or 10).
    pub discount_percent: u32,

    /// Total after discount, truncated to two decimal places.
    pub final_price: Decimal,
}
