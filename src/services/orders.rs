//! Order creation and lookup

use crate::core::error::{EntityKind, ShopError, ShopResult};
use crate::core::model::{Address, Order, OrderLine};
use crate::core::service::{OrderStore, StockStore};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

/// Input for creating an order
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewOrder {
    #[validate(length(min = 1, message = "user id must not be empty"))]
    pub user_id: String,

    #[validate(length(min = 1, message = "an order needs at least one product"))]
    #[validate(nested)]
    pub products: Vec<OrderLine>,

    #[validate(nested)]
    pub delivery_address: Address,
}

/// Creates orders after checking that every product they reference exists
///
/// Creating an order does not reserve stock.
#[derive(Clone)]
pub struct OrderService {
    orders: Arc<dyn OrderStore>,
    products: Arc<dyn StockStore>,
}

impl OrderService {
    pub fn new(orders: Arc<dyn OrderStore>, products: Arc<dyn StockStore>) -> Self {
        Self { orders, products }
    }

    /// Validate and store a new order in the REQUESTING state
    pub async fn create_order(&self, input: NewOrder) -> ShopResult<Order> {
        input
            .validate()
            .map_err(|e| ShopError::from_validation(&e))?;

        for line in &input.products {
            if !self.products.product_exists(&line.product_id).await? {
                return Err(ShopError::invalid_input(
                    "products",
                    format!("Product with id = {} does not exist", line.product_id),
                ));
            }
        }

        let order = Order::new(input.user_id, input.products, input.delivery_address);
        let created = self.orders.insert_order(order).await?;
        tracing::info!(
            order_id = %created.order_id,
            user_id = %created.user_id,
            lines = created.products.len(),
            "order created"
        );
        Ok(created)
    }

    /// Fetch a whole order
    pub async fn get_order(&self, order_id: &str) -> ShopResult<Order> {
        let id = Uuid::parse_str(order_id)
            .map_err(|_| ShopError::not_found(EntityKind::Order, order_id))?;
        self.orders
            .get_order(&id)
            .await?
            .ok_or_else(|| ShopError::not_found(EntityKind::Order, order_id))
    }
}
