//! In-memory store for testing and development

use crate::core::error::{EntityKind, ShopError, ShopResult};
use crate::core::model::{Order, Product, User};
use crate::core::service::{Decrement, OrderStore, StockStore, UserStore};
use crate::core::status::OrderStatus;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

/// In-memory implementation of every store trait
///
/// Each record kind sits behind its own `RwLock`. The stock decrement runs
/// entirely under the products write lock, which makes it atomic with
/// respect to every other reservation.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    products: Arc<RwLock<HashMap<String, Product>>>,
    orders: Arc<RwLock<HashMap<Uuid, Order>>>,
    users: Arc<RwLock<HashMap<String, User>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn read<T>(lock: &RwLock<T>) -> ShopResult<RwLockReadGuard<'_, T>> {
    lock.read()
        .map_err(|e| ShopError::storage("memory", format!("Failed to acquire read lock: {}", e)))
}

fn write<T>(lock: &RwLock<T>) -> ShopResult<RwLockWriteGuard<'_, T>> {
    lock.write()
        .map_err(|e| ShopError::storage("memory", format!("Failed to acquire write lock: {}", e)))
}

#[async_trait]
impl StockStore for InMemoryStore {
    async fn insert_product(&self, product: Product) -> ShopResult<Product> {
        let mut products = write(&self.products)?;
        if products.contains_key(&product.product_id) {
            return Err(ShopError::AlreadyExists {
                entity: EntityKind::Product,
                id: product.product_id,
            });
        }
        products.insert(product.product_id.clone(), product.clone());
        Ok(product)
    }

    async fn get_product(&self, product_id: &str) -> ShopResult<Option<Product>> {
        Ok(read(&self.products)?.get(product_id).cloned())
    }

    async fn decrement_if_available(&self, product_id: &str, count: u32) -> ShopResult<Decrement> {
        let mut products = write(&self.products)?;
        let Some(product) = products.get_mut(product_id) else {
            return Ok(Decrement::Missing);
        };

        match product.available_count.checked_sub(count) {
            Some(remaining) => {
                product.available_count = remaining;
                Ok(Decrement::Applied { remaining })
            }
            None => Ok(Decrement::Insufficient {
                available: product.available_count,
            }),
        }
    }
}

#[async_trait]
impl OrderStore for InMemoryStore {
    async fn insert_order(&self, order: Order) -> ShopResult<Order> {
        write(&self.orders)?.insert(order.order_id, order.clone());
        Ok(order)
    }

    async fn get_order(&self, order_id: &Uuid) -> ShopResult<Option<Order>> {
        Ok(read(&self.orders)?.get(order_id).cloned())
    }

    async fn set_status(&self, order_id: &Uuid, status: OrderStatus) -> ShopResult<bool> {
        let mut orders = write(&self.orders)?;
        match orders.get_mut(order_id) {
            Some(order) => {
                order.status = status;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn compare_and_set_status(
        &self,
        order_id: &Uuid,
        expected: OrderStatus,
        status: OrderStatus,
    ) -> ShopResult<bool> {
        let mut orders = write(&self.orders)?;
        match orders.get_mut(order_id) {
            Some(order) if order.status == expected => {
                order.status = status;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn orders_for_user(
        &self,
        user_id: &str,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> ShopResult<Vec<Order>> {
        let orders = read(&self.orders)?;
        let mut matching: Vec<Order> = orders
            .values()
            .filter(|order| {
                order.user_id == user_id
                    && start.is_none_or(|s| order.created_at >= s)
                    && end.is_none_or(|e| order.created_at <= e)
            })
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matching)
    }
}

#[async_trait]
impl UserStore for InMemoryStore {
    async fn insert_user(&self, user: User) -> ShopResult<User> {
        let mut users = write(&self.users)?;
        if users.contains_key(&user.user_id) {
            return Err(ShopError::AlreadyExists {
                entity: EntityKind::User,
                id: user.user_id,
            });
        }
        users.insert(user.user_id.clone(), user.clone());
        Ok(user)
    }

    async fn get_user(&self, user_id: &str) -> ShopResult<Option<User>> {
        Ok(read(&self.users)?.get(user_id).cloned())
    }
}
