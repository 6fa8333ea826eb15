//! Records persisted by the stores

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::core::status::OrderStatus;

/// Countries the shop delivers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Country {
    Uk,
    France,
    Germany,
}

/// Postal address, embedded in orders and users
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Address {
    #[validate(length(min = 1, message = "street name must not be empty"))]
    pub street_name: String,

    #[validate(length(min = 1, message = "city must not be empty"))]
    pub city: String,

    pub country: Country,

    #[validate(length(min = 2, max = 10, message = "post code must be 2 to 10 characters"))]
    pub post_code: String,

    #[serde(default)]
    pub apartment: Option<u32>,
}

/// A sellable product and its stock level
///
/// `available_count` is unsigned: a negative stock level is unrepresentable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Product {
    #[validate(length(min = 5, message = "product id must be at least 5 characters"))]
    pub product_id: String,

    #[validate(length(min = 1))]
    pub name: String,

    #[validate(range(min = 0.0, message = "price must not be negative"))]
    pub price: f64,

    pub available_count: u32,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub product_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Product {
    pub fn new(
        product_id: impl Into<String>,
        name: impl Into<String>,
        price: f64,
        available_count: u32,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            name: name.into(),
            price,
            available_count,
            product_type: None,
            description: None,
        }
    }
}

/// One line of an order: which product and how many
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct OrderLine {
    #[validate(length(min = 1, message = "product id must not be empty"))]
    pub product_id: String,

    #[validate(range(min = 1, message = "amount must be at least 1"))]
    pub amount: u32,
}

/// A customer order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: Uuid,
    pub user_id: String,
    pub products: Vec<OrderLine>,
    pub delivery_address: Address,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Build a new order in the initial REQUESTING state
    ///
    /// `created_at` is truncated to milliseconds, the resolution every
    /// backend can store.
    pub fn new(user_id: impl Into<String>, products: Vec<OrderLine>, address: Address) -> Self {
        Self {
            order_id: Uuid::new_v4(),
            user_id: user_id.into(),
            products,
            delivery_address: address,
            status: OrderStatus::default(),
            created_at: Utc::now().trunc_subsecs(3),
        }
    }
}

/// A registered customer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct User {
    #[validate(length(min = 1, message = "user id must not be empty"))]
    pub user_id: String,

    #[validate(length(min = 1, max = 64, message = "username must be 1 to 64 characters"))]
    pub username: String,

    #[validate(nested)]
    pub address: Address,
}
