//! Carts service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use rust_decimal::Decimal;
use rustc_hash::FxHashSet;
use tracing::{Span, debug, info};

use crate::domain::carts::{
    errors::CartsServiceError,
    models::{Cart, CartId, CartItemId, NewCartItem, Price},
    pricing,
    repository::CartsRepository,
};

/// Most distinct products a single cart may hold.
pub const MAX_DISTINCT_PRODUCTS: usize = 5;

/// Carts service backed by any [`CartsRepository`].
#[derive(Clone)]
pub struct RepositoryCartsService {
    repository: Arc<dyn CartsRepository>,
}

impl RepositoryCartsService {
    #[must_use]
    pub fn new(repository: Arc<dyn CartsRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl CartsService for RepositoryCartsService {
    #[tracing::instrument(name = "carts.service.create_cart", skip(self), err)]
    async fn create_cart(&self) -> Result<Cart, CartsServiceError> {
        let cart = self
            .repository
            .create_cart()
            .await
            .map_err(CartsServiceError::from_repository("create_cart"))?;

        info!(cart_id = %cart.id, "created cart");

        Ok(cart)
    }

    #[tracing::instrument(
        name = "carts.service.create_item",
        skip(self, item),
        fields(
            cart_id = %item.cart_id,
            item_id = tracing::field::Empty
        ),
        err
    )]
    async fn create_item(&self, item: NewCartItem) -> Result<CartItemId, CartsServiceError> {
        let cart_exists = self
            .repository
            .cart_exists(item.cart_id)
            .await
            .map_err(CartsServiceError::from_repository("cart_exists"))?;

        if !cart_exists {
            return Err(CartsServiceError::CartNotFound);
        }

        if item.product.trim().is_empty() {
            return Err(CartsServiceError::InvalidProduct);
        }

        if item.price < Decimal::ZERO {
            return Err(CartsServiceError::InvalidPrice);
        }

        let cart = self.get_cart(item.cart_id).await?;

        if exceeds_product_limit(&cart, &item.product) {
            debug!(
                product = %item.product,
                limit = MAX_DISTINCT_PRODUCTS,
                "rejected new distinct product"
            );

            return Err(CartsServiceError::ReachCartLimit);
        }

        let item_id = self
            .repository
            .create_item(item)
            .await
            .map_err(CartsServiceError::from_repository("create_item"))?;

        Span::current().record("item_id", tracing::field::display(item_id));

        info!("added cart item");

        Ok(item_id)
    }

    #[tracing::instrument(
        name = "carts.service.delete_item",
        skip(self),
        fields(cart_id = %cart, item_id = %item),
        err
    )]
    async fn delete_item(&self, cart: CartId, item: CartItemId) -> Result<(), CartsServiceError> {
        let item_exists = self
            .repository
            .item_exists(item)
            .await
            .map_err(CartsServiceError::from_repository("item_exists"))?;

        if !item_exists {
            return Err(CartsServiceError::ItemNotFound);
        }

        self.repository
            .delete_item(cart, item)
            .await
            .map_err(CartsServiceError::from_repository("delete_item"))?;

        info!("deleted cart item");

        Ok(())
    }

    #[tracing::instrument(name = "carts.service.get_cart", skip(self), fields(cart_id = %cart))]
    async fn get_cart(&self, cart: CartId) -> Result<Cart, CartsServiceError> {
        self.repository
            .get_cart(cart)
            .await
            .map_err(CartsServiceError::from_repository("get_cart"))
    }

    #[tracing::instrument(name = "carts.service.get_price", skip(self), fields(cart_id = %cart))]
    async fn get_price(&self, cart: CartId) -> Result<Price, CartsServiceError> {
        let cart = self.get_cart(cart).await?;

        let price = pricing::price_cart(&cart)?;

        debug!(
            total_price = %price.total_price,
            discount_percent = price.discount_percent,
            final_price = %price.final_price,
            "priced cart"
        );

        Ok(price)
    }
}

/// Whether adding `product` would push the cart past [`MAX_DISTINCT_PRODUCTS`].
///
/// More units of a product already in the cart never count against the limit.
fn exceeds_product_limit(cart: &Cart, product: &str) -> bool {
    let distinct: FxHashSet<&str> = cart.items.iter().map(|item| item.product.as_str()).collect();

    distinct.len() >= MAX_DISTINCT_PRODUCTS && !distinct.contains(product)
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Creates a new, empty cart.
    async fn create_cart(&self) -> Result<Cart, CartsServiceError>;

    /// Validates and adds an item to its cart, returning the new item ID.
    ///
    /// Checks run in a fixed order and the first failure wins: the cart must exist,
    /// the product must not be blank, the price must not be negative, and the item
    /// must not introduce a distinct product beyond [`MAX_DISTINCT_PRODUCTS`].
    async fn create_item(&self, item: NewCartItem) -> Result<CartItemId, CartsServiceError>;

    /// Removes an item from the given cart.
    async fn delete_item(&self, cart: CartId, item: CartItemId) -> Result<(), CartsServiceError>;

    /// Retrieve a single cart with its items.
    async fn get_cart(&self, cart: CartId) -> Result<Cart, CartsServiceError>;

    /// Prices the cart's current items.
    async fn get_price(&self, cart: CartId) -> Result<Price, CartsServiceError>;
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;
    use testresult::TestResult;

    use crate::domain::carts::{
        errors::CartsRepositoryError,
        models::CartItem,
        pricing::PriceOverflow,
        repository::MockCartsRepository,
    };

    use super::*;

    const CART: CartId = CartId::from_i64(1);

    fn service(repo: MockCartsRepository) -> RepositoryCartsService {
        RepositoryCartsService::new(Arc::new(repo))
    }

    fn new_item(product: &str, price: Decimal) -> NewCartItem {
        NewCartItem {
            cart_id: CART,
            product: product.to_string(),
            price,
        }
    }

    fn cart_with_products(products: &[&str]) -> Cart {
        Cart {
            id: CART,
            items: products
                .iter()
                .zip(1..)
                .map(|(product, id)| CartItem {
                    id: CartItemId::from_i64(id),
                    cart_id: CART,
                    product: (*product).to_string(),
                    price: Decimal::from(100),
                })
                .collect(),
        }
    }

    fn storage_error() -> CartsRepositoryError {
        CartsRepositoryError::Sql(sqlx::Error::PoolTimedOut)
    }

    #[tokio::test]
    async fn create_cart_returns_repository_cart() -> TestResult {
        let mut repo = MockCartsRepository::new();

        repo.expect_create_cart()
            .once()
            .returning(|| Ok(Cart::empty(CART)));

        let cart = service(repo).create_cart().await?;

        assert_eq!(cart, Cart::empty(CART));

        Ok(())
    }

    #[tokio::test]
    async fn create_cart_wraps_storage_errors() {
        let mut repo = MockCartsRepository::new();

        repo.expect_create_cart()
            .once()
            .returning(|| Err(storage_error()));

        let result = service(repo).create_cart().await;

        assert!(
            matches!(
                result,
                Err(CartsServiceError::Persistence {
                    operation: "create_cart",
                    ..
                })
            ),
            "expected Persistence, got {result:?}"
        );
    }

    #[tokio::test]
    async fn create_item_persists_valid_item() -> TestResult {
        let mut repo = MockCartsRepository::new();
        let item = new_item("apple", Decimal::new(1999, 2));
        let expected = item.clone();

        repo.expect_cart_exists()
            .once()
            .with(eq(CART))
            .returning(|_| Ok(true));
        repo.expect_get_cart()
            .once()
            .with(eq(CART))
            .returning(|_| Ok(cart_with_products(&["pear"])));
        repo.expect_create_item()
            .once()
            .withf(move |new| *new == expected)
            .returning(|_| Ok(CartItemId::from_i64(10)));

        let id = service(repo).create_item(item).await?;

        assert_eq!(id, CartItemId::from_i64(10));

        Ok(())
    }

    #[tokio::test]
    async fn create_item_unknown_cart_returns_cart_not_found() {
        let mut repo = MockCartsRepository::new();

        repo.expect_cart_exists().once().returning(|_| Ok(false));
        repo.expect_get_cart().never();
        repo.expect_create_item().never();

        let result = service(repo)
            .create_item(new_item("", Decimal::from(-1)))
            .await;

        assert!(
            matches!(result, Err(CartsServiceError::CartNotFound)),
            "expected CartNotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn create_item_existence_check_failure_is_wrapped() {
        let mut repo = MockCartsRepository::new();

        repo.expect_cart_exists()
            .once()
            .returning(|_| Err(storage_error()));
        repo.expect_create_item().never();

        let result = service(repo)
            .create_item(new_item("apple", Decimal::ONE))
            .await;

        assert!(
            matches!(
                result,
                Err(CartsServiceError::Persistence {
                    operation: "cart_exists",
                    ..
                })
            ),
            "expected Persistence, got {result:?}"
        );
    }

    #[tokio::test]
    async fn create_item_blank_product_returns_invalid_product() {
        for product in ["", "   ", "\t\n"] {
            for price in [Decimal::from(10), Decimal::from(-10)] {
                let mut repo = MockCartsRepository::new();

                repo.expect_cart_exists().once().returning(|_| Ok(true));
                repo.expect_get_cart().never();
                repo.expect_create_item().never();

                let result = service(repo).create_item(new_item(product, price)).await;

                assert!(
                    matches!(result, Err(CartsServiceError::InvalidProduct)),
                    "expected InvalidProduct for {product:?} at {price}, got {result:?}"
                );
            }
        }
    }

    #[tokio::test]
    async fn create_item_negative_price_returns_invalid_price() {
        let mut repo = MockCartsRepository::new();

        repo.expect_cart_exists().once().returning(|_| Ok(true));
        repo.expect_get_cart().never();
        repo.expect_create_item().never();

        let result = service(repo)
            .create_item(new_item("apple", Decimal::new(-1, 2)))
            .await;

        assert!(
            matches!(result, Err(CartsServiceError::InvalidPrice)),
            "expected InvalidPrice, got {result:?}"
        );
    }

    #[tokio::test]
    async fn create_item_zero_price_is_allowed() -> TestResult {
        let mut repo = MockCartsRepository::new();

        repo.expect_cart_exists().once().returning(|_| Ok(true));
        repo.expect_get_cart()
            .once()
            .returning(|_| Ok(Cart::empty(CART)));
        repo.expect_create_item()
            .once()
            .returning(|_| Ok(CartItemId::from_i64(1)));

        service(repo)
            .create_item(new_item("freebie", Decimal::ZERO))
            .await?;

        Ok(())
    }

    #[tokio::test]
    async fn create_item_sixth_distinct_product_returns_reach_cart_limit() {
        let mut repo = MockCartsRepository::new();

        repo.expect_cart_exists().once().returning(|_| Ok(true));
        repo.expect_get_cart()
            .once()
            .returning(|_| Ok(cart_with_products(&["a", "b", "c", "d", "e"])));
        repo.expect_create_item().never();

        let result = service(repo)
            .create_item(new_item("f", Decimal::ONE))
            .await;

        assert!(
            matches!(result, Err(CartsServiceError::ReachCartLimit)),
            "expected ReachCartLimit, got {result:?}"
        );
    }

    #[tokio::test]
    async fn create_item_existing_product_in_full_cart_is_allowed() -> TestResult {
        let mut repo = MockCartsRepository::new();

        repo.expect_cart_exists().once().returning(|_| Ok(true));
        repo.expect_get_cart()
            .once()
            .returning(|_| Ok(cart_with_products(&["a", "b", "c", "d", "e", "e", "e"])));
        repo.expect_create_item()
            .once()
            .returning(|_| Ok(CartItemId::from_i64(8)));

        let id = service(repo)
            .create_item(new_item("e", Decimal::ONE))
            .await?;

        assert_eq!(id, CartItemId::from_i64(8));

        Ok(())
    }

    #[tokio::test]
    async fn create_item_limit_counts_distinct_products_not_items() -> TestResult {
        let mut repo = MockCartsRepository::new();

        repo.expect_cart_exists().once().returning(|_| Ok(true));
        repo.expect_get_cart()
            .once()
            .returning(|_| Ok(cart_with_products(&["a", "a", "b", "b", "c", "d"])));
        repo.expect_create_item()
            .once()
            .returning(|_| Ok(CartItemId::from_i64(7)));

        service(repo)
            .create_item(new_item("e", Decimal::ONE))
            .await?;

        Ok(())
    }

    #[tokio::test]
    async fn create_item_storage_failure_is_wrapped() {
        let mut repo = MockCartsRepository::new();

        repo.expect_cart_exists().once().returning(|_| Ok(true));
        repo.expect_get_cart()
            .once()
            .returning(|_| Ok(Cart::empty(CART)));
        repo.expect_create_item()
            .once()
            .returning(|_| Err(storage_error()));

        let result = service(repo)
            .create_item(new_item("apple", Decimal::ONE))
            .await;

        assert!(
            matches!(
                result,
                Err(CartsServiceError::Persistence {
                    operation: "create_item",
                    ..
                })
            ),
            "expected Persistence, got {result:?}"
        );
    }

    #[tokio::test]
    async fn delete_item_unknown_item_returns_item_not_found() {
        let mut repo = MockCartsRepository::new();

        repo.expect_item_exists()
            .once()
            .with(eq(CartItemId::from_i64(3)))
            .returning(|_| Ok(false));
        repo.expect_delete_item().never();

        let result = service(repo)
            .delete_item(CART, CartItemId::from_i64(3))
            .await;

        assert!(
            matches!(result, Err(CartsServiceError::ItemNotFound)),
            "expected ItemNotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn delete_item_scopes_delete_by_cart_and_item() -> TestResult {
        let mut repo = MockCartsRepository::new();

        repo.expect_item_exists().once().returning(|_| Ok(true));
        repo.expect_delete_item()
            .once()
            .with(eq(CART), eq(CartItemId::from_i64(3)))
            .returning(|_, _| Ok(()));

        service(repo)
            .delete_item(CART, CartItemId::from_i64(3))
            .await?;

        Ok(())
    }

    #[tokio::test]
    async fn delete_item_in_other_cart_propagates_item_not_found() {
        let mut repo = MockCartsRepository::new();

        repo.expect_item_exists().once().returning(|_| Ok(true));
        repo.expect_delete_item()
            .once()
            .returning(|_, _| Err(CartsRepositoryError::ItemNotFound));

        let result = service(repo)
            .delete_item(CartId::from_i64(99), CartItemId::from_i64(3))
            .await;

        assert!(
            matches!(result, Err(CartsServiceError::ItemNotFound)),
            "expected ItemNotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn get_cart_unknown_cart_returns_cart_not_found() {
        let mut repo = MockCartsRepository::new();

        repo.expect_get_cart()
            .once()
            .returning(|_| Err(CartsRepositoryError::CartNotFound));

        let result = service(repo).get_cart(CART).await;

        assert!(
            matches!(result, Err(CartsServiceError::CartNotFound)),
            "expected CartNotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn get_cart_wraps_storage_errors() {
        let mut repo = MockCartsRepository::new();

        repo.expect_get_cart()
            .once()
            .returning(|_| Err(storage_error()));

        let result = service(repo).get_cart(CART).await;

        assert!(
            matches!(
                result,
                Err(CartsServiceError::Persistence {
                    operation: "get_cart",
                    ..
                })
            ),
            "expected Persistence, got {result:?}"
        );
    }

    #[tokio::test]
    async fn get_price_applies_quantity_discount() -> TestResult {
        let mut repo = MockCartsRepository::new();

        repo.expect_get_cart()
            .once()
            .returning(|_| Ok(cart_with_products(&["a", "b", "c", "d"])));

        let price = service(repo).get_price(CART).await?;

        assert_eq!(price.cart_id, CART);
        assert_eq!(price.total_price, Decimal::from(400));
        assert_eq!(price.discount_percent, 5);
        assert_eq!(price.final_price, Decimal::from(380));

        Ok(())
    }

    #[tokio::test]
    async fn get_price_out_of_range_total_returns_pricing_error() {
        let mut repo = MockCartsRepository::new();

        repo.expect_get_cart().once().returning(|_| {
            let mut cart = cart_with_products(&["a", "b"]);

            for item in &mut cart.items {
                item.price = Decimal::from_i128_with_scale(5 * 10_i128.pow(28), 0);
            }

            Ok(cart)
        });

        let result = service(repo).get_price(CART).await;

        assert!(
            matches!(result, Err(CartsServiceError::Pricing(PriceOverflow))),
            "expected Pricing, got {result:?}"
        );
    }

    #[tokio::test]
    async fn get_price_unknown_cart_returns_cart_not_found() {
        let mut repo = MockCartsRepository::new();

        repo.expect_get_cart()
            .once()
            .returning(|_| Err(CartsRepositoryError::CartNotFound));

        let result = service(repo).get_price(CART).await;

        assert!(
            matches!(result, Err(CartsServiceError::CartNotFound)),
            "expected CartNotFound, got {result:?}"
        );
    }
}
