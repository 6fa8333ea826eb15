//! HTTP handlers, one module per resource

pub mod orders;
pub mod products;
pub mod users;
