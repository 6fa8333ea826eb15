//! Route table for the REST API
//!
//! - `/api/v1/products/...`: availability checks and reservations
//! - `/api/v1/orders/...`: order creation and status tracking
//! - `/api/v1/users/...`: registration and order history
//! - `/health`, `/healthz`: liveness

use super::handlers::{orders, products, users};
use super::state::AppState;
use axum::{
    Json, Router,
    routing::{get, post, put},
};
use serde_json::{Value, json};
use tower_http::trace::TraceLayer;

/// Build the full application router
pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .nest("/products", product_routes())
        .nest("/orders", order_routes())
        .nest("/users", user_routes());

    Router::new()
        .merge(health_routes())
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn product_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/available-product/{product_id}",
            get(products::available_product),
        )
        .route(
            "/discount-product-count/{product_id}",
            put(products::discount_product_count),
        )
        .route("/{product_id}", get(products::get_product))
}

fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/create-order", post(orders::create_order))
        .route("/update-order-status", put(orders::update_order_status))
        .route("/get-order-status/{order_id}", get(orders::get_order_status))
        .route("/{order_id}", get(orders::get_order))
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/create-user", post(users::create_user))
        .route("/user-info/{user_id}", get(users::user_info))
        .route("/user-orders/{user_id}", get(users::user_orders))
}

fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "shop-api"
    }))
}
