//! Cart Repositories

mod carts;
mod items;

use async_trait::async_trait;

use crate::{
    database::Db,
    domain::carts::{
        errors::CartsRepositoryError,
        models::{Cart, CartId, CartItemId, NewCartItem},
        repository::CartsRepository,
    },
};

use carts::CartsTable;
use items::CartItemsTable;

/// `PostgreSQL` implementation of [`CartsRepository`].
#[derive(Debug, Clone)]
pub struct PgCartsRepository {
    db: Db,
    carts: CartsTable,
    items: CartItemsTable,
}

impl PgCartsRepository {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            carts: CartsTable::new(),
            items: CartItemsTable::new(),
        }
    }
}

#[async_trait]
impl CartsRepository for PgCartsRepository {
    #[tracing::instrument(name = "carts.repository.create_cart", skip(self), err)]
    async fn create_cart(&self) -> Result<Cart, CartsRepositoryError> {
        let mut tx = self.db.begin_transaction().await?;

        let cart = self.carts.create_cart(&mut tx).await?;

        tx.commit().await?;

        Ok(cart)
    }

    #[tracing::instrument(name = "carts.repository.get_cart", skip(self), err)]
    async fn get_cart(&self, cart: CartId) -> Result<Cart, CartsRepositoryError> {
        let mut tx = self.db.begin_transaction().await?;

        let mut found = self
            .carts
            .get_cart(&mut tx, cart)
            .await
            .map_err(|error| match error {
                sqlx::Error::RowNotFound => CartsRepositoryError::CartNotFound,
                other => other.into(),
            })?;

        let items = self.items.get_cart_items(&mut tx, cart).await?;

        tx.commit().await?;

        found.items.extend(items);

        Ok(found)
    }

    #[tracing::instrument(
        name = "carts.repository.create_item",
        skip(self, item),
        fields(cart_id = %item.cart_id),
        err
    )]
    async fn create_item(&self, item: NewCartItem) -> Result<CartItemId, CartsRepositoryError> {
        let mut tx = self.db.begin_transaction().await?;

        let id = self.items.create_cart_item(&mut tx, item).await?;

        tx.commit().await?;

        Ok(id)
    }

    #[tracing::instrument(name = "carts.repository.delete_item", skip(self), err)]
    async fn delete_item(
        &self,
        cart: CartId,
        item: CartItemId,
    ) -> Result<(), CartsRepositoryError> {
        let mut tx = self.db.begin_transaction().await?;

        let rows_affected = self.items.delete_cart_item(&mut tx, cart, item).await?;

        if rows_affected == 0 {
            return Err(CartsRepositoryError::ItemNotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    #[tracing::instrument(name = "carts.repository.cart_exists", skip(self), err)]
    async fn cart_exists(&self, cart: CartId) -> Result<bool, CartsRepositoryError> {
        let mut tx = self.db.begin_transaction().await?;

        let exists = self.carts.cart_exists(&mut tx, cart).await?;

        tx.commit().await?;

        Ok(exists)
    }

    #[tracing::instrument(name = "carts.repository.item_exists", skip(self), err)]
    async fn item_exists(&self, item: CartItemId) -> Result<bool, CartsRepositoryError> {
        let mut tx = self.db.begin_transaction().await?;

        let exists = self.items.cart_item_exists(&mut tx, item).await?;

        tx.commit().await?;

        Ok(exists)
    }
}
