//! User registration and order history

use crate::core::error::ShopResult;
use crate::core::model::{Order, User};
use crate::server::extract::{ValidatedJson, ValidatedQuery};
use crate::server::state::AppState;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Inclusive RFC 3339 bounds on `created_at`
#[derive(Debug, Default, Deserialize, Validate)]
pub struct DateRange {
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct UserOrders {
    pub user_id: String,
    pub orders: Vec<Order>,
    pub count: usize,
}

/// POST /api/v1/users/create-user
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(user): ValidatedJson<User>,
) -> ShopResult<(StatusCode, Json<User>)> {
    let user = state.users.create_user(user).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /api/v1/users/user-info/{user_id}
pub async fn user_info(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ShopResult<Json<User>> {
    Ok(Json(state.users.user_info(&user_id).await?))
}

/// GET /api/v1/users/user-orders/{user_id}
pub async fn user_orders(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    ValidatedQuery(range): ValidatedQuery<DateRange>,
) -> ShopResult<Json<UserOrders>> {
    let orders = state
        .users
        .user_orders(&user_id, range.start_date, range.end_date)
        .await?;
    Ok(Json(UserOrders {
        user_id,
        count: orders.len(),
        orders,
    }))
}
