//! Store traits for products, orders and users
//!
//! Implementations provide single-step reads and writes against one backend.
//! The ledger and tracker are written against these traits and stay agnostic
//! to the underlying storage mechanism.

use crate::core::error::ShopResult;
use crate::core::model::{Order, Product, User};
use crate::core::status::OrderStatus;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Outcome of a conditional stock decrement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decrement {
    /// The decrement was written; `remaining` is the new available count
    Applied { remaining: u32 },
    /// Not enough stock; nothing was written
    Insufficient { available: u32 },
    /// No product with that id; nothing was written
    Missing,
}

/// Product storage, including the atomic stock primitive
#[async_trait]
pub trait StockStore: Send + Sync {
    /// Insert a product (seed/import). Fails with `AlreadyExists` on a
    /// duplicate product id.
    async fn insert_product(&self, product: Product) -> ShopResult<Product>;

    /// Fetch a product by its product id
    async fn get_product(&self, product_id: &str) -> ShopResult<Option<Product>>;

    /// Whether a product with this id exists
    async fn product_exists(&self, product_id: &str) -> ShopResult<bool> {
        Ok(self.get_product(product_id).await?.is_some())
    }

    /// Decrement `available_count` by `count` only if it is at least `count`
    ///
    /// The check and the write must be a single atomic step with respect to
    /// every other call on the same product: implementations either issue one
    /// conditional update to the backend or hold an exclusive lock over the
    /// read-modify-write.
    async fn decrement_if_available(&self, product_id: &str, count: u32) -> ShopResult<Decrement>;
}

/// Order storage
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Insert a new order
    async fn insert_order(&self, order: Order) -> ShopResult<Order>;

    /// Fetch an order by id
    async fn get_order(&self, order_id: &Uuid) -> ShopResult<Option<Order>>;

    /// Overwrite the status. Returns `false` if no order matched.
    async fn set_status(&self, order_id: &Uuid, status: OrderStatus) -> ShopResult<bool>;

    /// Overwrite the status only while it still equals `expected`.
    /// Returns `false` if no order matched both id and status.
    async fn compare_and_set_status(
        &self,
        order_id: &Uuid,
        expected: OrderStatus,
        status: OrderStatus,
    ) -> ShopResult<bool>;

    /// Orders placed by a user, newest first, with inclusive optional bounds
    /// on `created_at`
    async fn orders_for_user(
        &self,
        user_id: &str,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> ShopResult<Vec<Order>>;
}

/// User storage
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a user. Fails with `AlreadyExists` on a duplicate user id.
    async fn insert_user(&self, user: User) -> ShopResult<User>;

    /// Fetch a user by id
    async fn get_user(&self, user_id: &str) -> ShopResult<Option<User>>;
}

/// A backend that stores every record kind
///
/// Blanket-implemented so one handle can be injected wherever all three
/// stores are needed.
pub trait ShopStore: StockStore + OrderStore + UserStore {}

impl<T: StockStore + OrderStore + UserStore> ShopStore for T {}
