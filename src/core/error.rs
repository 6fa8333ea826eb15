//! Typed error handling for the shop service
//!
//! Every store, ledger and tracker operation returns [`ShopResult`]. Each
//! [`ShopError`] variant maps to one HTTP status and a stable error code so
//! handlers can simply propagate with `?`.
//!
//! # Example
//!
//! ```rust,ignore
//! match ledger.reserve("p-monitor", 3).await {
//!     Ok(remaining) => println!("{remaining} left"),
//!     Err(ShopError::InsufficientStock { available, .. }) => {
//!         println!("only {available} in stock");
//!     }
//!     Err(e) => eprintln!("other error: {e}"),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;
use validator::ValidationErrors;

use crate::core::status::OrderStatus;

/// Result alias used by every store and service operation.
pub type ShopResult<T> = Result<T, ShopError>;

/// The record kinds an error can refer to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Product,
    Order,
    User,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Product => write!(f, "product"),
            EntityKind::Order => write!(f, "order"),
            EntityKind::User => write!(f, "user"),
        }
    }
}

fn not_found_message(entity: &EntityKind, id: &str) -> String {
    match entity {
        EntityKind::Product => format!("Product with product id = {} does not exist", id),
        EntityKind::Order => "Order not found".to_string(),
        EntityKind::User => format!("User with user id = {} does not exist", id),
    }
}

/// The main error type for the shop service
#[derive(Debug, thiserror::Error)]
pub enum ShopError {
    /// Referenced record is absent
    #[error("{}", not_found_message(.entity, .id))]
    NotFound { entity: EntityKind, id: String },

    /// Malformed or out-of-range argument
    #[error("Invalid value for '{field}': {message}")]
    InvalidInput { field: String, message: String },

    /// Reservation would take `available_count` below zero
    #[error(
        "discount count is bigger than available products, available products = {available}"
    )]
    InsufficientStock {
        product_id: String,
        available: u32,
        requested: u32,
    },

    /// Status change not permitted by the configured transition table
    #[error("Order status cannot change from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    /// A record with the same key already exists
    #[error("{entity} with id '{id}' already exists")]
    AlreadyExists { entity: EntityKind, id: String },

    /// Storage backend failure
    #[error("{backend} storage error: {message}")]
    Storage { backend: String, message: String },
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ShopError {
    pub fn not_found(entity: EntityKind, id: impl Into<String>) -> Self {
        ShopError::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        ShopError::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn storage(backend: impl Into<String>, message: impl fmt::Display) -> Self {
        ShopError::Storage {
            backend: backend.into(),
            message: message.to_string(),
        }
    }

    /// Convert request-shape failures reported by `validator`
    pub fn from_validation(errors: &ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors.errors().keys().map(|k| k.to_string()).collect();
        fields.sort();
        ShopError::InvalidInput {
            field: fields.join(","),
            message: errors.to_string(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ShopError::NotFound { .. } => StatusCode::NOT_FOUND,
            ShopError::InvalidInput { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ShopError::InsufficientStock { .. } => StatusCode::BAD_REQUEST,
            ShopError::InvalidTransition { .. } => StatusCode::CONFLICT,
            ShopError::AlreadyExists { .. } => StatusCode::CONFLICT,
            ShopError::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ShopError::NotFound { entity, .. } => match entity {
                EntityKind::Product => "PRODUCT_NOT_FOUND",
                EntityKind::Order => "ORDER_NOT_FOUND",
                EntityKind::User => "USER_NOT_FOUND",
            },
            ShopError::InvalidInput { .. } => "INVALID_INPUT",
            ShopError::InsufficientStock { .. } => "INSUFFICIENT_STOCK",
            ShopError::InvalidTransition { .. } => "INVALID_TRANSITION",
            ShopError::AlreadyExists { .. } => "ALREADY_EXISTS",
            ShopError::Storage { .. } => "STORAGE_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            ShopError::NotFound { entity, id } => Some(serde_json::json!({
                "entity": entity.to_string(),
                "id": id,
            })),
            ShopError::InvalidInput { field, .. } => Some(serde_json::json!({ "field": field })),
            ShopError::InsufficientStock {
                product_id,
                available,
                requested,
            } => Some(serde_json::json!({
                "product_id": product_id,
                "available": available,
                "requested": requested,
            })),
            ShopError::InvalidTransition { from, to } => Some(serde_json::json!({
                "from": from,
                "to": to,
            })),
            _ => None,
        }
    }
}

impl IntoResponse for ShopError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

#[cfg(feature = "mongodb_backend")]
impl From<mongodb::error::Error> for ShopError {
    fn from(err: mongodb::error::Error) -> Self {
        ShopError::storage("mongodb", err)
    }
}
