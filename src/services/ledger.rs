//! Stock ledger: the only writer of `available_count`
//!
//! Every decrement goes through [`StockLedger::reserve`], which delegates the
//! check-and-write to the store's atomic [`StockStore::decrement_if_available`].
//! Two concurrent reservations against the same product therefore serialize
//! inside the store and can never drive the count below zero.

use crate::core::error::{EntityKind, ShopError, ShopResult};
use crate::core::model::Product;
use crate::core::service::{Decrement, StockStore};
use std::sync::Arc;

/// Product availability accounting
#[derive(Clone)]
pub struct StockLedger {
    store: Arc<dyn StockStore>,
}

impl StockLedger {
    pub fn new(store: Arc<dyn StockStore>) -> Self {
        Self { store }
    }

    /// Atomically take `count` units of a product
    ///
    /// Returns the new `available_count`. On `NotFound` or
    /// `InsufficientStock` the product record is untouched.
    pub async fn reserve(&self, product_id: &str, count: u32) -> ShopResult<u32> {
        ensure_positive(count)?;

        match self.store.decrement_if_available(product_id, count).await? {
            Decrement::Applied { remaining } => {
                tracing::info!(product_id, count, remaining, "stock reserved");
                Ok(remaining)
            }
            Decrement::Insufficient { available } => {
                tracing::warn!(
                    product_id,
                    requested = count,
                    available,
                    "reservation rejected: insufficient stock"
                );
                Err(ShopError::InsufficientStock {
                    product_id: product_id.to_string(),
                    available,
                    requested: count,
                })
            }
            Decrement::Missing => Err(ShopError::not_found(EntityKind::Product, product_id)),
        }
    }

    /// Whether at least `count` units are available right now
    ///
    /// Advisory only: a concurrent [`reserve`](Self::reserve) may consume the
    /// stock between this check and any later action. Use `reserve` to
    /// actually claim units.
    pub async fn is_available(&self, product_id: &str, count: u32) -> ShopResult<bool> {
        ensure_positive(count)?;
        let product = self.product(product_id).await?;
        tracing::debug!(
            product_id,
            count,
            available = product.available_count,
            "availability check"
        );
        Ok(product.available_count >= count)
    }

    /// Read a product
    pub async fn product(&self, product_id: &str) -> ShopResult<Product> {
        self.store
            .get_product(product_id)
            .await?
            .ok_or_else(|| ShopError::not_found(EntityKind::Product, product_id))
    }
}

fn ensure_positive(count: u32) -> ShopResult<()> {
    if count == 0 {
        return Err(ShopError::invalid_input("count", "count must be at least 1"));
    }
    Ok(())
}
