//! Domain services built on top of the store traits
//!
//! - [`StockLedger`]: atomic reservations and availability checks
//! - [`OrderStatusTracker`]: order status reads and writes
//! - [`OrderService`] / [`UserService`]: pass-through creation and lookups

pub mod ledger;
pub mod orders;
pub mod tracker;
pub mod users;

pub use ledger::StockLedger;
pub use orders::{NewOrder, OrderService};
pub use tracker::OrderStatusTracker;
pub use users::UserService;
