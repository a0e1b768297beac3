//! Cart Items Table

use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::domain::carts::models::{CartId, CartItem, CartItemId, NewCartItem};

const GET_CART_ITEMS_SQL: &str = include_str!("../sql/get_cart_items.sql");
const CREATE_CART_ITEM_SQL: &str = include_str!("../sql/create_cart_item.sql");
const DELETE_CART_ITEM_SQL: &str = include_str!("../sql/delete_cart_item.sql");
const CART_ITEM_EXISTS_SQL: &str = include_str!("../sql/cart_item_exists.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct CartItemsTable;

impl CartItemsTable {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_cart_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartId,
    ) -> Result<Vec<CartItem>, sqlx::Error> {
        query_as::<Postgres, CartItem>(GET_CART_ITEMS_SQL)
            .bind(cart.into_i64())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_cart_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: NewCartItem,
    ) -> Result<CartItemId, sqlx::Error> {
        let id: i64 = query_scalar(CREATE_CART_ITEM_SQL)
            .bind(item.cart_id.into_i64())
            .bind(item.product)
            .bind(item.price)
            .fetch_one(&mut **tx)
            .await?;

        Ok(CartItemId::from_i64(id))
    }

    pub(crate) async fn delete_cart_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartId,
        item: CartItemId,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_CART_ITEM_SQL)
            .bind(item.into_i64())
            .bind(cart.into_i64())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn cart_item_exists(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: CartItemId,
    ) -> Result<bool, sqlx::Error> {
        query_scalar::<Postgres, bool>(CART_ITEM_EXISTS_SQL)
            .bind(item.into_i64())
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for CartItem {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: CartItemId::from_i64(row.try_get("id")?),
            cart_id: CartId::from_i64(row.try_get("cart_id")?),
            product: row.try_get("product")?,
            price: row.try_get::<Decimal, _>("price")?,
        })
    }
}
