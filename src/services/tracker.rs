//! Order status tracker

use crate::core::error::{EntityKind, ShopError, ShopResult};
use crate::core::service::OrderStore;
use crate::core::status::{OrderStatus, StatusPolicy};
use std::sync::Arc;
use uuid::Uuid;

/// Stores and retrieves the status of orders
///
/// With [`StatusPolicy::Lenient`] every change is a single unconditional
/// write. With [`StatusPolicy::Strict`] the change is checked against the
/// transition table and written conditionally on the status that was read.
#[derive(Clone)]
pub struct OrderStatusTracker {
    store: Arc<dyn OrderStore>,
    policy: StatusPolicy,
}

impl OrderStatusTracker {
    pub fn new(store: Arc<dyn OrderStore>, policy: StatusPolicy) -> Self {
        Self { store, policy }
    }

    pub fn policy(&self) -> StatusPolicy {
        self.policy
    }

    /// Current status of an order
    pub async fn get_status(&self, order_id: &str) -> ShopResult<OrderStatus> {
        let id = parse_order_id(order_id)?;
        let order = self
            .store
            .get_order(&id)
            .await?
            .ok_or_else(|| ShopError::not_found(EntityKind::Order, order_id))?;
        Ok(order.status)
    }

    /// Change the status of an order
    pub async fn set_status(&self, order_id: &str, status: OrderStatus) -> ShopResult<()> {
        let id = parse_order_id(order_id)?;

        match self.policy {
            StatusPolicy::Lenient => {
                if !self.store.set_status(&id, status).await? {
                    return Err(ShopError::not_found(EntityKind::Order, order_id));
                }
            }
            StatusPolicy::Strict => {
                let current = self.get_status(order_id).await?;
                if !self.policy.allows(current, status) {
                    tracing::warn!(%order_id, from = %current, to = %status, "status change rejected");
                    return Err(ShopError::InvalidTransition {
                        from: current,
                        to: status,
                    });
                }
                if !self
                    .store
                    .compare_and_set_status(&id, current, status)
                    .await?
                {
                    // Changed underneath us; report against the value now stored.
                    let now = self.get_status(order_id).await?;
                    tracing::warn!(%order_id, from = %now, to = %status, "concurrent status change");
                    return Err(ShopError::InvalidTransition {
                        from: now,
                        to: status,
                    });
                }
            }
        }

        tracing::info!(%order_id, %status, "order status updated");
        Ok(())
    }
}

/// Ids that cannot be parsed cannot name an order, so they are reported as
/// not found.
fn parse_order_id(order_id: &str) -> ShopResult<Uuid> {
    Uuid::parse_str(order_id).map_err(|_| ShopError::not_found(EntityKind::Order, order_id))
}
