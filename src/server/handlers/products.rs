//! Product availability and stock reservation

use crate::core::error::ShopResult;
use crate::core::model::Product;
use crate::server::extract::{ValidatedPath, ValidatedQuery};
use crate::server::state::AppState;
use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct ProductPath {
    #[validate(length(min = 5, message = "product id must be at least 5 characters"))]
    pub product_id: String,
}

/// `count` for an availability check, required; negative or oversized
/// values fail deserialization
#[derive(Debug, Deserialize, Validate)]
pub struct AvailabilityQuery {
    #[validate(range(min = 1, message = "count must be at least 1"))]
    pub count: u32,
}

fn default_count() -> u32 {
    1
}

/// `count` for a reservation, one unit when omitted
#[derive(Debug, Deserialize, Validate)]
pub struct ReserveQuery {
    #[serde(default = "default_count")]
    #[validate(range(min = 1, message = "count must be at least 1"))]
    pub count: u32,
}

#[derive(Debug, Serialize)]
pub struct AvailabilityResponse {
    pub is_available: bool,
}

#[derive(Debug, Serialize)]
pub struct ReserveResponse {
    pub message: &'static str,
    pub available_count: u32,
}

/// GET /api/v1/products/available-product/{product_id}?count=N
pub async fn available_product(
    State(state): State<AppState>,
    ValidatedPath(path): ValidatedPath<ProductPath>,
    ValidatedQuery(query): ValidatedQuery<AvailabilityQuery>,
) -> ShopResult<Json<AvailabilityResponse>> {
    let is_available = state
        .ledger
        .is_available(&path.product_id, query.count)
        .await?;
    Ok(Json(AvailabilityResponse { is_available }))
}

/// PUT /api/v1/products/discount-product-count/{product_id}?count=N
pub async fn discount_product_count(
    State(state): State<AppState>,
    ValidatedPath(path): ValidatedPath<ProductPath>,
    ValidatedQuery(query): ValidatedQuery<ReserveQuery>,
) -> ShopResult<Json<ReserveResponse>> {
    let available_count = state
        .ledger
        .reserve(&path.product_id, query.count)
        .await?;
    Ok(Json(ReserveResponse {
        message: "Updated correctly",
        available_count,
    }))
}

/// GET /api/v1/products/{product_id}
pub async fn get_product(
    State(state): State<AppState>,
    ValidatedPath(path): ValidatedPath<ProductPath>,
) -> ShopResult<Json<Product>> {
    Ok(Json(state.ledger.product(&path.product_id).await?))
}
