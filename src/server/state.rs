//! State shared by every handler

use crate::core::service::{OrderStore, ShopStore, StockStore, UserStore};
use crate::core::status::StatusPolicy;
use crate::services::{OrderService, OrderStatusTracker, StockLedger, UserService};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub ledger: StockLedger,
    pub tracker: OrderStatusTracker,
    pub orders: OrderService,
    pub users: UserService,
}

impl AppState {
    /// Wire every service to one store
    pub fn new<S: ShopStore + 'static>(store: Arc<S>, policy: StatusPolicy) -> Self {
        Self::from_parts(store.clone(), store.clone(), store, policy)
    }

    /// Wire the services to separate stores
    pub fn from_parts(
        stock: Arc<dyn StockStore>,
        orders: Arc<dyn OrderStore>,
        users: Arc<dyn UserStore>,
        policy: StatusPolicy,
    ) -> Self {
        Self {
            ledger: StockLedger::new(stock.clone()),
            tracker: OrderStatusTracker::new(orders.clone(), policy),
            orders: OrderService::new(orders.clone(), stock),
            users: UserService::new(users, orders),
        }
    }
}
