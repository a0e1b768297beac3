//! Cart Price Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use cartly_app::domain::carts::models::{CartId, Price};

use crate::{
    carts::{amounts, errors::into_status_error},
    extensions::*,
    state::State,
};

/// Price Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PriceResponse {
    /// The priced cart
    pub cart_id: i64,

    /// Sum of all item prices
    pub total_price: f64,

    /// Applied discount in percent (0, 5 or 10)
    pub discount_percent: u32,

    /// Total after discount, truncated to cents
    pub final_price: f64,
}

impl TryFrom<Price> for PriceResponse {
    type Error = StatusError;

    fn try_from(price: Price) -> Result<Self, Self::Error> {
        Ok(Self {
            cart_id: price.cart_id.into_i64(),
            total_price: amounts::to_json(price.total_price)?,
            discount_percent: price.discount_percent,
            final_price: amounts::to_json(price.final_price)?,
        })
    }
}

/// Cart Price Handler
///
/// Prices the cart's current items. More than 3 items earns 5% off; a total
/// above 5000 earns 10% off instead.
#[endpoint(
    tags("carts"),
    summary = "Get Cart Price",
    responses(
        (status_code = StatusCode::OK, description = "Cart priced"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    cart: PathParam<i64>,
    depot: &mut Depot,
) -> Result<Json<PriceResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let price = state
        .app
        .carts
        .get_price(CartId::from_i64(cart.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(Json(price.try_into()?))
}
