//! Get Cart Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use cartly_app::domain::carts::models::{Cart, CartId, CartItem};

use crate::{
    carts::{amounts, errors::into_status_error},
    extensions::*,
    state::State,
};

/// Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    /// The unique identifier of the cart
    pub id: i64,

    /// The items in the cart, oldest first
    pub items: Vec<CartItemResponse>,
}

impl TryFrom<Cart> for CartResponse {
    type Error = StatusError;

    fn try_from(cart: Cart) -> Result<Self, Self::Error> {
        Ok(Self {
            id: cart.id.into_i64(),
            items: cart
                .items
                .into_iter()
                .map(CartItemResponse::try_from)
                .collect::<Result<_, _>>()?,
        })
    }
}

/// Cart Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartItemResponse {
    /// The unique identifier of the cart item
    pub id: i64,

    /// The cart holding this item
    pub cart_id: i64,

    /// Product display name
    pub product: String,

    /// Unit price
    pub price: f64,
}

impl TryFrom<CartItem> for CartItemResponse {
    type Error = StatusError;

    fn try_from(item: CartItem) -> Result<Self, Self::Error> {
        Ok(Self {
            id: item.id.into_i64(),
            cart_id: item.cart_id.into_i64(),
            product: item.product,
            price: amounts::to_json(item.price)?,
        })
    }
}

/// Get Cart Handler
///
/// Returns a cart and its items.
#[endpoint(
    tags("carts"),
    summary = "Get Cart",
    responses(
        (status_code = StatusCode::OK, description = "Cart found"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    cart: PathParam<i64>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let cart = state
        .app
        .carts
        .get_cart(CartId::from_i64(cart.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.try_into()?))
}
