//! Delete Cart Item Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use cartly_app::domain::carts::models::{CartId, CartItemId};

use crate::{carts::errors::into_status_error, extensions::*, state::State};

/// Delete Cart Item Handler
///
/// Removes an item; the item must belong to the cart in the path.
#[endpoint(
    tags("carts"),
    summary = "Delete Cart Item",
    responses(
        (status_code = StatusCode::OK, description = "Cart item deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart item not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    )
)]
pub(crate) async fn handler(
    cart: PathParam<i64>,
    item: PathParam<i64>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .carts
        .delete_item(
            CartId::from_i64(cart.into_inner()),
            CartItemId::from_i64(item.into_inner()),
        )
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::OK)
}
