//! Conversion between JSON numbers and exact decimal amounts.

use rust_decimal::{Decimal, prelude::ToPrimitive as _};
use salvo::http::StatusError;
use tracing::error;

use crate::extensions::*;

const OUT_OF_RANGE: &str = "price must be a finite number within range";

/// Reads a client-supplied amount, rejecting `NaN`, infinities and magnitudes
/// beyond [`Decimal::MAX`].
pub(crate) fn from_json(amount: f64) -> Result<Decimal, StatusError> {
    Decimal::try_from(amount).or_400(OUT_OF_RANGE)
}

/// Renders a stored amount as a JSON number.
pub(crate) fn to_json(amount: Decimal) -> Result<f64, StatusError> {
    amount.to_f64().ok_or_else(|| {
        error!(%amount, "amount cannot be represented as a JSON number");

        StatusError::internal_server_error()
    })
}
