//! Order creation and status tracking

use crate::core::error::ShopResult;
use crate::core::model::Order;
use crate::core::status::OrderStatus;
use crate::server::extract::ValidatedJson;
use crate::server::state::AppState;
use crate::services::NewOrder;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Serialize)]
pub struct CreatedOrder {
    pub order_id: Uuid,
}

#[derive(Debug, Deserialize, Validate)]
pub struct StatusUpdate {
    pub order_id: String,
    pub status: OrderStatus,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    #[serde(rename = "orderStatus")]
    pub order_status: OrderStatus,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// POST /api/v1/orders/create-order
pub async fn create_order(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<NewOrder>,
) -> ShopResult<(StatusCode, Json<CreatedOrder>)> {
    let order = state.orders.create_order(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedOrder {
            order_id: order.order_id,
        }),
    ))
}

/// PUT /api/v1/orders/update-order-status
pub async fn update_order_status(
    State(state): State<AppState>,
    ValidatedJson(update): ValidatedJson<StatusUpdate>,
) -> ShopResult<Json<MessageResponse>> {
    state
        .tracker
        .set_status(&update.order_id, update.status)
        .await?;
    Ok(Json(MessageResponse {
        message: "Updated correctly",
    }))
}

/// GET /api/v1/orders/get-order-status/{order_id}
pub async fn get_order_status(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> ShopResult<Json<StatusResponse>> {
    let order_status = state.tracker.get_status(&order_id).await?;
    Ok(Json(StatusResponse { order_status }))
}

/// GET /api/v1/orders/{order_id}
pub async fn get_order(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> ShopResult<Json<Order>> {
    Ok(Json(state.orders.get_order(&order_id).await?))
}
