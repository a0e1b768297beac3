//! Carts errors.

use thiserror::Error;

use super::pricing::PriceOverflow;

/// Failures reported by a [`CartsRepository`](super::CartsRepository).
#[derive(Debug, Error)]
pub enum CartsRepositoryError {
    #[error("cart not found")]
    CartNotFound,

    #[error("cart item not found")]
    ItemNotFound,

    #[error("storage error")]
    Sql(#[from] sqlx::Error),
}

/// Failures surfaced by a [`CartsService`](super::CartsService).
#[derive(Debug, Error)]
pub enum CartsServiceError {
    #[error("cart not found")]
    CartNotFound,

    #[error("item not found")]
    ItemNotFound,

    #[error("product name cannot be blank")]
    InvalidProduct,

    #[error("price cannot be negative")]
    InvalidPrice,

    #[error("cart limit reached: max 5 distinct products")]
    ReachCartLimit,

    #[error("cannot price cart")]
    Pricing(#[from] PriceOverflow),

    #[error("{operation} failed")]
    Persistence {
        operation: &'static str,

        #[source]
        source: CartsRepositoryError,
    },
}

impl CartsServiceError {
    /// Maps a repository failure, keeping not-found kinds and tagging anything else
    /// with the repository operation that produced it.
    pub(crate) fn from_repository(
        operation: &'static str,
    ) -> impl FnOnce(CartsRepositoryError) -> Self {
        move |error| match error {
            CartsRepositoryError::CartNotFound => Self::CartNotFound,
            CartsRepositoryError::ItemNotFound => Self::ItemNotFound,
            source @ CartsRepositoryError::Sql(_) => Self::Persistence { operation, source },
        }
    }
}
