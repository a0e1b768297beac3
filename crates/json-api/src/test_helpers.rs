//! Test helpers.

use std::sync::Arc;

use rust_decimal::Decimal;
use salvo::{affix_state::inject, prelude::*};

use cartly_app::{
    context::AppContext,
    domain::carts::{
        MockCartsService,
        models::{Cart, CartId, CartItem, CartItemId},
    },
};

use crate::state::State;

pub(crate) const TEST_CART: CartId = CartId::from_i64(7);

pub(crate) fn state_with_carts(carts: MockCartsService) -> Arc<State> {
    State::from_app_context(AppContext {
        carts: Arc::new(carts),
    })
}

/// Serves `route` with the carts mock injected as application state.
pub(crate) fn carts_service(carts: MockCartsService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_carts(carts)))
            .push(route),
    )
}

/// A cart holding one item per `(product, price in cents)` pair.
pub(crate) fn make_cart(id: CartId, items: &[(&str, i64)]) -> Cart {
    Cart {
        id,
        items: items
            .iter()
            .zip(1..)
            .map(|((product, cents), item_id)| CartItem {
                id: CartItemId::from_i64(item_id),
                cart_id: id,
                product: (*product).to_string(),
                price: Decimal::new(*cents, 2),
            })
            .collect(),
    }
}
