//! Create Cart Item Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use cartly_app::domain::carts::models::{CartId, NewCartItem};

use crate::{
    carts::{amounts, errors::into_status_error, get::CartItemResponse},
    extensions::*,
    state::State,
};

/// Create Cart Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateCartItemRequest {
    /// Product display name; must not be blank
    pub product: String,

    /// Unit price; must not be negative
    pub price: f64,
}

impl CreateCartItemRequest {
    fn into_new_cart_item(self, cart: CartId) -> Result<NewCartItem, StatusError> {
        Ok(NewCartItem {
            cart_id: cart,
            product: self.product,
            price: amounts::from_json(self.price)?,
        })
    }
}

/// Create Cart Item Handler
///
/// Adds an item to a cart. A cart holds at most 5 distinct products.
#[endpoint(
    tags("carts"),
    summary = "Add Item to Cart",
    responses(
        (status_code = StatusCode::CREATED, description = "Cart item created"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid product, invalid price, or cart limit reached"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    cart: PathParam<i64>,
    json: JsonBody<CreateCartItemRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CartItemResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let cart = CartId::from_i64(cart.into_inner());
    let item = json.into_inner().into_new_cart_item(cart)?;
    let product = item.product.clone();
    let price = item.price;

    let id = state
        .app
        .carts
        .create_item(item)
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/carts/{cart}/items/{id}"), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(CartItemResponse {
        id: id.into_i64(),
        cart_id: cart.into_i64(),
        product,
        price: amounts::to_json(price)?,
    }))
}
