//! Carts persistence contract.

use async_trait::async_trait;
use mockall::automock;

use crate::domain::carts::{
    errors::CartsRepositoryError,
    models::{Cart, CartId, CartItemId, NewCartItem},
};

/// Storage operations the carts service depends on.
///
/// Implementations enforce no business rules. The existence checks are not atomic
/// with any mutation that follows them.
#[automock]
#[async_trait]
pub trait CartsRepository: Send + Sync {
    /// Creates an empty cart with a fresh store-assigned ID.
    async fn create_cart(&self) -> Result<Cart, CartsRepositoryError>;

    /// Retrieves a cart with all of its items.
    ///
    /// Fails with [`CartsRepositoryError::CartNotFound`] when no such cart exists.
    async fn get_cart(&self, cart: CartId) -> Result<Cart, CartsRepositoryError>;

    /// Inserts an item and returns its store-assigned ID.
    async fn create_item(&self, item: NewCartItem) -> Result<CartItemId, CartsRepositoryError>;

    /// Deletes the item with the given ID from the given cart.
    ///
    /// Fails with [`CartsRepositoryError::ItemNotFound`] when no row matched both IDs.
    async fn delete_item(&self, cart: CartId, item: CartItemId)
    -> Result<(), CartsRepositoryError>;

    /// Whether a cart with the given ID exists.
    async fn cart_exists(&self, cart: CartId) -> Result<bool, CartsRepositoryError>;

    /// Whether an item with the given ID exists in any cart.
    async fn item_exists(&self, item: CartItemId) -> Result<bool, CartsRepositoryError>;
}
