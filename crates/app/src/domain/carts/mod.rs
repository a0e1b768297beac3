//! Carts

pub mod errors;
pub mod models;
pub mod pricing;
mod repositories;
pub mod repository;
pub mod service;

pub use errors::{CartsRepositoryError, CartsServiceError};
pub use repositories::PgCartsRepository;
pub use repository::*;
pub use service::*;
