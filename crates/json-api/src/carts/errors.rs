//! Errors

use salvo::http::StatusError;
use tracing::{error, warn};

use cartly_app::domain::carts::CartsServiceError;

pub(crate) fn into_status_error(error: CartsServiceError) -> StatusError {
    match error {
        CartsServiceError::CartNotFound => StatusError::not_found().brief("Cart not found"),
        CartsServiceError::ItemNotFound => StatusError::not_found().brief("Cart item not found"),
        CartsServiceError::InvalidProduct
        | CartsServiceError::InvalidPrice
        | CartsServiceError::ReachCartLimit => {
            warn!("business rule violation: {error}");

            StatusError::bad_request().brief(error.to_string())
        }
        CartsServiceError::Pricing(source) => {
            error!("cart pricing failure: {source}");

            StatusError::internal_server_error().brief("Cart total is out of range")
        }
        CartsServiceError::Persistence { operation, source } => {
            error!(operation, "cart storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
