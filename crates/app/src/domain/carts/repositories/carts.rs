//! Carts Table

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, query_scalar};

use crate::domain::carts::models::{Cart, CartId};

const GET_CART_SQL: &str = include_str!("../sql/get_cart.sql");
const CREATE_CART_SQL: &str = include_str!("../sql/create_cart.sql");
const CART_EXISTS_SQL: &str = include_str!("../sql/cart_exists.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct CartsTable;

impl CartsTable {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartId,
    ) -> Result<Cart, sqlx::Error> {
        query_as::<Postgres, Cart>(GET_CART_SQL)
            .bind(cart.into_i64())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Cart, sqlx::Error> {
        query_as::<Postgres, Cart>(CREATE_CART_SQL)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn cart_exists(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartId,
    ) -> Result<bool, sqlx::Error> {
        query_scalar::<Postgres, bool>(CART_EXISTS_SQL)
            .bind(cart.into_i64())
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for Cart {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let cart_items_count: i64 = row.try_get("cart_items_count")?;

        let cart_items_count =
            usize::try_from(cart_items_count).map_err(|e| sqlx::Error::ColumnDecode {
                index: "cart_items_count".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            id: CartId::from_i64(row.try_get("id")?),
            items: Vec::with_capacity(cart_items_count),
        })
    }
}
