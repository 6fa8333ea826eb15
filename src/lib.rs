//! # shop-api
//!
//! Backend for a small web shop: products with stock levels, orders with a
//! delivery status, and users with an order history, exposed as a REST API.
//!
//! ## Features
//!
//! - **Atomic stock reservation**: [`services::StockLedger::reserve`] never
//!   drives `available_count` below zero, however many requests race
//! - **Order status tracking**: lenient (any change) or strict (transition
//!   table with conditional writes) via [`core::StatusPolicy`]
//! - **Pluggable storage**: in-memory, or MongoDB behind the
//!   `mongodb_backend` feature
//! - **Typed errors**: every failure maps to one HTTP status and error code
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use shop::prelude::*;
//!
//! let store = InMemoryStore::new();
//! store.insert_product(Product::new("p-monitor", "Monitor", 149.0, 5)).await?;
//!
//! ServerBuilder::new()
//!     .with_store(store)
//!     .with_status_policy(StatusPolicy::Strict)
//!     .serve("127.0.0.1:3000")
//!     .await?;
//! ```

pub mod config;
pub mod core;
pub mod server;
pub mod services;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        Address, Country, Decrement, EntityKind, Order, OrderLine, OrderStatus, OrderStore,
        Product, ShopError, ShopResult, ShopStore, StatusPolicy, StockStore, User, UserStore,
    };

    // === Services ===
    pub use crate::services::{NewOrder, OrderService, OrderStatusTracker, StockLedger, UserService};

    // === Storage ===
    pub use crate::storage::InMemoryStore;
    #[cfg(feature = "mongodb_backend")]
    pub use crate::storage::MongoStore;

    // === Config ===
    pub use crate::config::{AppConfig, StorageKind};

    // === Server ===
    pub use crate::server::{AppState, ServerBuilder, build_router};

    // === External dependencies ===
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use uuid::Uuid;
}
