//! REST integration test macro for store backends.
//!
//! The `rest_integration_tests!` macro drives the whole stack through HTTP:
//! JSON → request → handler → service → store → response → JSON.
//!
//! # Generated Tests
//!
//! ## Products
//! - `test_rest_health`: `/health` and `/healthz`
//! - `test_rest_availability`: true, false, 404 and 422 cases
//! - `test_rest_discount_product_count`: reservation, default count, 400 and 404
//! - `test_rest_get_product`: product JSON keeps the `type` key
//!
//! ## Orders
//! - `test_rest_order_lifecycle`: create, read status, update, read again
//! - `test_rest_order_not_found`: unknown and malformed ids → 404
//! - `test_rest_order_invalid_input`: unknown product, empty lines, bad status → 422
//! - `test_rest_strict_policy_rejects_skips`: 409 on a forbidden transition
//!
//! ## Users
//! - `test_rest_user_registration`: 201, duplicate 409, user-info 200/404
//! - `test_rest_user_orders`: history with count and date bounds

/// Generate a REST integration test suite for a store backend.
///
/// `$factory` must produce an `impl ShopStore + Clone + 'static`.
#[macro_export]
macro_rules! rest_integration_tests {
    ($factory:expr) => {
        mod rest_integration_tests {
            use super::*;
            use axum::http::StatusCode;
            use axum_test::TestServer;
            use serde_json::{Value, json};
            use shop::core::service::{OrderStore, StockStore};
            use shop::core::status::StatusPolicy;
            use shop::server::ServerBuilder;

            async fn make_server(policy: StatusPolicy) -> TestServer {
                let store = $factory;
                store
                    .insert_product(sample_product("p-monitor", 5))
                    .await
                    .unwrap();
                store
                    .insert_product(sample_product("p-keyboard", 1))
                    .await
                    .unwrap();
                let router = ServerBuilder::new()
                    .with_store(store)
                    .with_status_policy(policy)
                    .build()
                    .unwrap();
                TestServer::new(router)
            }

            fn order_body(product_ids: &[&str]) -> Value {
                json!({
                    "user_id": "mario",
                    "products": product_ids
                        .iter()
                        .map(|id| json!({"product_id": id, "amount": 1}))
                        .collect::<Vec<_>>(),
                    "delivery_address": {
                        "street_name": "Rue de Rivoli",
                        "city": "Paris",
                        "country": "FRANCE",
                        "post_code": "75001"
                    }
                })
            }

            async fn create_order(server: &TestServer) -> String {
                let response = server
                    .post("/api/v1/orders/create-order")
                    .json(&order_body(&["p-monitor"]))
                    .await;
                response.assert_status(StatusCode::CREATED);
                let body: Value = response.json();
                body["order_id"].as_str().unwrap().to_string()
            }

            async fn order_status(server: &TestServer, order_id: &str) -> Value {
                let response = server
                    .get(&format!("/api/v1/orders/get-order-status/{}", order_id))
                    .await;
                response.assert_status_ok();
                response.json::<Value>()["orderStatus"].clone()
            }

            // ==============================================================
            // Products
            // ==============================================================

            #[tokio::test]
            async fn test_rest_health() {
                let server = make_server(StatusPolicy::Lenient).await;
                for path in ["/health", "/healthz"] {
                    let body: Value = server.get(path).await.json();
                    assert_eq!(body, json!({"status": "ok", "service": "shop-api"}));
                }
            }

            #[tokio::test]
            async fn test_rest_availability() {
                let server = make_server(StatusPolicy::Lenient).await;
                let path = "/api/v1/products/available-product/p-monitor";

                let body: Value = server.get(path).add_query_param("count", 5).await.json();
                assert_eq!(body, json!({"is_available": true}));

                let body: Value = server.get(path).add_query_param("count", 6).await.json();
                assert_eq!(body, json!({"is_available": false}));

                server
                    .get(path)
                    .add_query_param("count", 0)
                    .await
                    .assert_status(StatusCode::UNPROCESSABLE_ENTITY);
                server
                    .get(path)
                    .await
                    .assert_status(StatusCode::UNPROCESSABLE_ENTITY);
                server
                    .get(path)
                    .add_query_param("count", 4_294_967_296u64)
                    .await
                    .assert_status(StatusCode::UNPROCESSABLE_ENTITY);
                server
                    .get(path)
                    .add_query_param("count", -2)
                    .await
                    .assert_status(StatusCode::UNPROCESSABLE_ENTITY);
                server
                    .get("/api/v1/products/available-product/p1")
                    .add_query_param("count", 1)
                    .await
                    .assert_status(StatusCode::UNPROCESSABLE_ENTITY);

                let response = server
                    .get("/api/v1/products/available-product/p-ghost")
                    .add_query_param("count", 1)
                    .await;
                response.assert_status(StatusCode::NOT_FOUND);
                let body: Value = response.json();
                assert_eq!(body["code"], "PRODUCT_NOT_FOUND");
                assert_eq!(
                    body["message"],
                    "Product with product id = p-ghost does not exist"
                );
            }

            #[tokio::test]
            async fn test_rest_discount_product_count() {
                let server = make_server(StatusPolicy::Lenient).await;
                let path = "/api/v1/products/discount-product-count/p-monitor";

                let response = server.put(path).add_query_param("count", 3).await;
                response.assert_status_ok();
                let body: Value = response.json();
                assert_eq!(
                    body,
                    json!({"message": "Updated correctly", "available_count": 2})
                );

                let body: Value = server.put(path).await.json();
                assert_eq!(body["available_count"], 1);

                let response = server.put(path).add_query_param("count", 2).await;
                response.assert_status(StatusCode::BAD_REQUEST);
                let body: Value = response.json();
                assert_eq!(body["code"], "INSUFFICIENT_STOCK");
                assert_eq!(
                    body["message"],
                    "discount count is bigger than available products, available products = 1"
                );

                let product: Value = server.get("/api/v1/products/p-monitor").await.json();
                assert_eq!(product["available_count"], 1);

                server
                    .put("/api/v1/products/discount-product-count/p-ghost")
                    .await
                    .assert_status(StatusCode::NOT_FOUND);
                server
                    .put(path)
                    .add_query_param("count", -1)
                    .await
                    .assert_status(StatusCode::UNPROCESSABLE_ENTITY);
            }

            #[tokio::test]
            async fn test_rest_get_product() {
                let server = make_server(StatusPolicy::Lenient).await;

                let response = server.get("/api/v1/products/p-keyboard").await;
                response.assert_status_ok();
                let body: Value = response.json();
                assert_eq!(body["product_id"], "p-keyboard");
                assert_eq!(body["type"], "electronics");
                assert_eq!(body["available_count"], 1);

                server
                    .get("/api/v1/products/p-ghost")
                    .await
                    .assert_status(StatusCode::NOT_FOUND);
            }

            // ==============================================================
            // Orders
            // ==============================================================

            #[tokio::test]
            async fn test_rest_order_lifecycle() {
                let server = make_server(StatusPolicy::Lenient).await;
                let order_id = create_order(&server).await;

                assert_eq!(order_status(&server, &order_id).await, "REQUESTING");

                let response = server
                    .put("/api/v1/orders/update-order-status")
                    .json(&json!({"order_id": order_id, "status": "DISPATCHED"}))
                    .await;
                response.assert_status_ok();
                let body: Value = response.json();
                assert_eq!(body, json!({"message": "Updated correctly"}));

                assert_eq!(order_status(&server, &order_id).await, "DISPATCHED");

                let order: Value = server
                    .get(&format!("/api/v1/orders/{}", order_id))
                    .await
                    .json();
                assert_eq!(order["order_id"], order_id.as_str());
                assert_eq!(order["status"], "DISPATCHED");
                assert_eq!(order["delivery_address"]["country"], "FRANCE");
            }

            #[tokio::test]
            async fn test_rest_order_not_found() {
                let server = make_server(StatusPolicy::Lenient).await;

                let response = server
                    .get(&format!(
                        "/api/v1/orders/get-order-status/{}",
                        uuid::Uuid::new_v4()
                    ))
                    .await;
                response.assert_status(StatusCode::NOT_FOUND);
                let body: Value = response.json();
                assert_eq!(body["code"], "ORDER_NOT_FOUND");
                assert_eq!(body["message"], "Order not found");

                server
                    .get("/api/v1/orders/get-order-status/not-a-uuid")
                    .await
                    .assert_status(StatusCode::NOT_FOUND);
                server
                    .put("/api/v1/orders/update-order-status")
                    .json(&json!({"order_id": uuid::Uuid::new_v4(), "status": "ACCEPTED"}))
                    .await
                    .assert_status(StatusCode::NOT_FOUND);
                for order_id in ["", "not-a-uuid"] {
                    let response = server
                        .put("/api/v1/orders/update-order-status")
                        .json(&json!({"order_id": order_id, "status": "ACCEPTED"}))
                        .await;
                    response.assert_status(StatusCode::NOT_FOUND);
                    let body: Value = response.json();
                    assert_eq!(body["code"], "ORDER_NOT_FOUND");
                }
            }

            #[tokio::test]
            async fn test_rest_order_invalid_input() {
                let server = make_server(StatusPolicy::Lenient).await;

                let response = server
                    .post("/api/v1/orders/create-order")
                    .json(&order_body(&["p-monitor", "p-ghost"]))
                    .await;
                response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
                let body: Value = response.json();
                assert_eq!(body["code"], "INVALID_INPUT");
                assert_eq!(body["details"]["field"], "products");

                server
                    .post("/api/v1/orders/create-order")
                    .json(&order_body(&[]))
                    .await
                    .assert_status(StatusCode::UNPROCESSABLE_ENTITY);

                let order_id = create_order(&server).await;
                server
                    .put("/api/v1/orders/update-order-status")
                    .json(&json!({"order_id": order_id, "status": "LOST"}))
                    .await
                    .assert_status(StatusCode::UNPROCESSABLE_ENTITY);
                assert_eq!(order_status(&server, &order_id).await, "REQUESTING");
            }

            #[tokio::test]
            async fn test_rest_strict_policy_rejects_skips() {
                let server = make_server(StatusPolicy::Strict).await;
                let order_id = create_order(&server).await;

                let response = server
                    .put("/api/v1/orders/update-order-status")
                    .json(&json!({"order_id": order_id, "status": "DELIVERED"}))
                    .await;
                response.assert_status(StatusCode::CONFLICT);
                let body: Value = response.json();
                assert_eq!(body["code"], "INVALID_TRANSITION");
                assert_eq!(order_status(&server, &order_id).await, "REQUESTING");

                server
                    .put("/api/v1/orders/update-order-status")
                    .json(&json!({"order_id": order_id, "status": "ACCEPTED"}))
                    .await
                    .assert_status_ok();
                assert_eq!(order_status(&server, &order_id).await, "ACCEPTED");
            }

            // ==============================================================
            // Users
            // ==============================================================

            #[tokio::test]
            async fn test_rest_user_registration() {
                let server = make_server(StatusPolicy::Lenient).await;
                let user = json!({
                    "user_id": "mario",
                    "username": "Mario",
                    "address": {
                        "street_name": "Friedrichstrasse 43",
                        "city": "Berlin",
                        "country": "GERMANY",
                        "post_code": "10117",
                        "apartment": 12
                    }
                });

                let response = server.post("/api/v1/users/create-user").json(&user).await;
                response.assert_status(StatusCode::CREATED);
                assert_eq!(response.json::<Value>(), user);

                server
                    .post("/api/v1/users/create-user")
                    .json(&user)
                    .await
                    .assert_status(StatusCode::CONFLICT);

                let fetched: Value = server.get("/api/v1/users/user-info/mario").await.json();
                assert_eq!(fetched, user);

                let response = server.get("/api/v1/users/user-info/luigi").await;
                response.assert_status(StatusCode::NOT_FOUND);
                assert_eq!(response.json::<Value>()["code"], "USER_NOT_FOUND");
            }

            #[tokio::test]
            async fn test_rest_user_orders() {
                let store = $factory;
                store
                    .insert_order(sample_order_at("mario", chrono::Utc::now() - chrono::Duration::days(3)))
                    .await
                    .unwrap();
                store
                    .insert_order(sample_order_at("mario", chrono::Utc::now() - chrono::Duration::days(1)))
                    .await
                    .unwrap();
                shop::core::service::UserStore::insert_user(&store, sample_user("mario"))
                    .await
                    .unwrap();
                let server =
                    TestServer::new(ServerBuilder::new().with_store(store).build().unwrap());

                let body: Value = server.get("/api/v1/users/user-orders/mario").await.json();
                assert_eq!(body["user_id"], "mario");
                assert_eq!(body["count"], 2);

                let since = (chrono::Utc::now() - chrono::Duration::days(2)).to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
                let body: Value = server
                    .get("/api/v1/users/user-orders/mario")
                    .add_query_param("start_date", &since)
                    .await
                    .json();
                assert_eq!(body["count"], 1);
                assert_eq!(body["orders"].as_array().unwrap().len(), 1);

                server
                    .get("/api/v1/users/user-orders/luigi")
                    .await
                    .assert_status(StatusCode::NOT_FOUND);
                server
                    .get("/api/v1/users/user-orders/mario")
                    .add_query_param("start_date", "yesterday")
                    .await
                    .assert_status(StatusCode::UNPROCESSABLE_ENTITY);
            }
        }
    };
}
