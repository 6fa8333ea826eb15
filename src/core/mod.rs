//! Core module containing the records, store traits and error type

pub mod error;
pub mod model;
pub mod service;
pub mod status;

pub use error::{EntityKind, ErrorResponse, ShopError, ShopResult};
pub use model::{Address, Country, Order, OrderLine, Product, User};
pub use service::{Decrement, OrderStore, ShopStore, StockStore, UserStore};
pub use status::{OrderStatus, StatusPolicy};
