//! MongoDB storage backend using the official MongoDB async driver.
//!
//! Provides [`MongoStore`], which implements every store trait against a
//! `mongodb::Database`.
//!
//! # Feature flag
//!
//! This module is gated behind the `mongodb_backend` feature flag:
//! ```toml
//! [dependencies]
//! shop-api = { version = "0.1", features = ["mongodb_backend"] }
//! ```
//!
//! # Storage model
//!
//! Three collections: `products`, `orders` and `users`. Products and users
//! keep their business key (`product_id`, `user_id`) as a regular field
//! guarded by a unique index. Orders use their UUID as `_id`.
//!
//! # Serialization strategy
//!
//! Records are serialized via `serde_json::Value` as an intermediate format,
//! then converted to BSON documents. UUIDs are stored as strings. The order
//! `created_at` is stored as a native BSON datetime so range filters and
//! sorting happen on the server.
//!
//! # Atomic decrement
//!
//! [`StockStore::decrement_if_available`] is a single `findOneAndUpdate`
//! whose filter carries the `available_count >= count` guard. The server
//! applies filter and `$inc` atomically per document, so concurrent
//! reservations can never take the count below zero.

use crate::core::error::{EntityKind, ShopError, ShopResult};
use crate::core::model::{Order, Product, User};
use crate::core::service::{Decrement, OrderStore, StockStore, UserStore};
use crate::core::status::OrderStatus;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::bson::{self, Bson, Document, doc};
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::ReturnDocument;
use mongodb::{Collection, Database, IndexModel};
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

const BACKEND: &str = "mongodb";
const DUPLICATE_KEY: i32 = 11000;

// ---------------------------------------------------------------------------
// Conversion helpers
// ---------------------------------------------------------------------------

/// Convert a serde_json::Value (expected to be an Object) into a BSON Document,
/// renaming `id_field` → `_id` when one is given.
fn json_to_document(json: serde_json::Value, id_field: Option<&str>) -> ShopResult<Document> {
    let bson_val = bson::to_bson(&json)
        .map_err(|e| ShopError::storage(BACKEND, format!("Failed to convert JSON to BSON: {}", e)))?;

    let mut doc = match bson_val {
        Bson::Document(d) => d,
        _ => {
            return Err(ShopError::storage(
                BACKEND,
                "Expected BSON document, got non-object",
            ));
        }
    };

    if let Some(field) = id_field
        && let Some(id) = doc.remove(field)
    {
        doc.insert("_id", id);
    }

    Ok(doc)
}

/// Convert a BSON Document back into a serde_json::Value, renaming
/// `_id` → `id_field`. Without an `id_field` the server-assigned `_id`
/// is dropped.
fn document_to_json(mut doc: Document, id_field: Option<&str>) -> serde_json::Value {
    if let (Some(id), Some(field)) = (doc.remove("_id"), id_field) {
        doc.insert(field, id);
    }

    Bson::Document(doc).into_relaxed_extjson()
}

/// Convert a UUID to its BSON string representation for queries.
fn uuid_bson(id: &Uuid) -> Bson {
    Bson::String(id.to_string())
}

fn bson_datetime(at: DateTime<Utc>) -> Bson {
    Bson::DateTime(bson::DateTime::from_millis(at.timestamp_millis()))
}

fn to_document<T: Serialize>(record: &T, id_field: Option<&str>) -> ShopResult<Document> {
    let json = serde_json::to_value(record)
        .map_err(|e| ShopError::storage(BACKEND, format!("Failed to serialize record: {}", e)))?;
    json_to_document(json, id_field)
}

fn from_document<T: DeserializeOwned>(doc: Document, id_field: Option<&str>) -> ShopResult<T> {
    serde_json::from_value(document_to_json(doc, id_field)).map_err(|e| {
        ShopError::storage(
            BACKEND,
            format!("Failed to deserialize record from document: {}", e),
        )
    })
}

fn order_to_document(order: &Order) -> ShopResult<Document> {
    let mut doc = to_document(order, Some("order_id"))?;
    doc.insert("created_at", bson_datetime(order.created_at));
    Ok(doc)
}

fn document_to_order(mut doc: Document) -> ShopResult<Order> {
    if let Ok(at) = doc.get_datetime("created_at") {
        let millis = at.timestamp_millis();
        let created_at = DateTime::<Utc>::from_timestamp_millis(millis).ok_or_else(|| {
            ShopError::storage(BACKEND, format!("created_at out of range: {}", millis))
        })?;
        doc.insert("created_at", created_at.to_rfc3339());
    }
    from_document(doc, Some("order_id"))
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error)) if write_error.code == DUPLICATE_KEY
    )
}

// ---------------------------------------------------------------------------
// MongoStore
// ---------------------------------------------------------------------------

/// Shop storage backed by MongoDB.
///
/// # Example
///
/// ```rust,ignore
/// use mongodb::Client;
/// use shop::storage::MongoStore;
///
/// let client = Client::with_uri_str("mongodb://localhost:27017").await?;
/// let store = MongoStore::new(client.database("ecommerce"));
/// store.ensure_indexes().await?;
/// ```
#[derive(Clone, Debug)]
pub struct MongoStore {
    database: Database,
}

impl MongoStore {
    /// Create a new `MongoStore` with the given database handle.
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    /// Get a reference to the underlying database.
    pub fn database(&self) -> &Database {
        &self.database
    }

    fn products(&self) -> Collection<Document> {
        self.database.collection("products")
    }

    fn orders(&self) -> Collection<Document> {
        self.database.collection("orders")
    }

    fn users(&self) -> Collection<Document> {
        self.database.collection("users")
    }

    /// Create the indexes every query relies on.
    ///
    /// - `products.product_id` (unique)
    /// - `users.user_id` (unique)
    /// - `orders.user_id, orders.created_at` for order history
    ///
    /// Idempotent, safe to call on every startup.
    pub async fn ensure_indexes(&self) -> ShopResult<()> {
        let unique = mongodb::options::IndexOptions::builder()
            .unique(true)
            .build();

        self.products()
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "product_id": 1 })
                    .options(unique.clone())
                    .build(),
            )
            .await?;
        self.users()
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "user_id": 1 })
                    .options(unique)
                    .build(),
            )
            .await?;
        self.orders()
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "user_id": 1, "created_at": -1 })
                    .build(),
            )
            .await?;

        Ok(())
    }
}

#[async_trait]
impl StockStore for MongoStore {
    async fn insert_product(&self, product: Product) -> ShopResult<Product> {
        let doc = to_document(&product, None)?;
        match self.products().insert_one(doc).await {
            Ok(_) => Ok(product),
            Err(e) if is_duplicate_key(&e) => Err(ShopError::AlreadyExists {
                entity: EntityKind::Product,
                id: product.product_id,
            }),
            Err(e) => Err(e.into()),
        }
    }

    async fn get_product(&self, product_id: &str) -> ShopResult<Option<Product>> {
        let doc = self
            .products()
            .find_one(doc! { "product_id": product_id })
            .await?;

        doc.map(|d| from_document(d, None)).transpose()
    }

    async fn decrement_if_available(&self, product_id: &str, count: u32) -> ShopResult<Decrement> {
        let count = i64::from(count);
        let updated = self
            .products()
            .find_one_and_update(
                doc! { "product_id": product_id, "available_count": { "$gte": count } },
                doc! { "$inc": { "available_count": -count } },
            )
            .return_document(ReturnDocument::After)
            .await?;

        if let Some(doc) = updated {
            let product: Product = from_document(doc, None)?;
            return Ok(Decrement::Applied {
                remaining: product.available_count,
            });
        }

        // Nothing matched the guarded filter: tell a missing product apart
        // from one without enough stock.
        Ok(match self.get_product(product_id).await? {
            Some(product) => Decrement::Insufficient {
                available: product.available_count,
            },
            None => Decrement::Missing,
        })
    }
}

#[async_trait]
impl OrderStore for MongoStore {
    async fn insert_order(&self, order: Order) -> ShopResult<Order> {
        let doc = order_to_document(&order)?;
        self.orders().insert_one(doc).await?;
        Ok(order)
    }

    async fn get_order(&self, order_id: &Uuid) -> ShopResult<Option<Order>> {
        let doc = self
            .orders()
            .find_one(doc! { "_id": uuid_bson(order_id) })
            .await?;

        doc.map(document_to_order).transpose()
    }

    async fn set_status(&self, order_id: &Uuid, status: OrderStatus) -> ShopResult<bool> {
        let result = self
            .orders()
            .update_one(
                doc! { "_id": uuid_bson(order_id) },
                doc! { "$set": { "status": status.as_str() } },
            )
            .await?;

        Ok(result.matched_count > 0)
    }

    async fn compare_and_set_status(
        &self,
        order_id: &Uuid,
        expected: OrderStatus,
        status: OrderStatus,
    ) -> ShopResult<bool> {
        let result = self
            .orders()
            .update_one(
                doc! { "_id": uuid_bson(order_id), "status": expected.as_str() },
                doc! { "$set": { "status": status.as_str() } },
            )
            .await?;

        Ok(result.matched_count > 0)
    }

    async fn orders_for_user(
        &self,
        user_id: &str,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> ShopResult<Vec<Order>> {
        let mut filter = doc! { "user_id": user_id };
        let mut range = Document::new();
        if let Some(start) = start {
            range.insert("$gte", bson_datetime(start));
        }
        if let Some(end) = end {
            range.insert("$lte", bson_datetime(end));
        }
        if !range.is_empty() {
            filter.insert("created_at", range);
        }

        let cursor = self
            .orders()
            .find(filter)
            .sort(doc! { "created_at": -1 })
            .await?;

        let docs: Vec<Document> = cursor.try_collect().await?;

        docs.into_iter().map(document_to_order).collect()
    }
}

#[async_trait]
impl UserStore for MongoStore {
    async fn insert_user(&self, user: User) -> ShopResult<User> {
        let doc = to_document(&user, None)?;
        match self.users().insert_one(doc).await {
            Ok(_) => Ok(user),
            Err(e) if is_duplicate_key(&e) => Err(ShopError::AlreadyExists {
                entity: EntityKind::User,
                id: user.user_id,
            }),
            Err(e) => Err(e.into()),
        }
    }

    async fn get_user(&self, user_id: &str) -> ShopResult<Option<User>> {
        let doc = self.users().find_one(doc! { "user_id": user_id }).await?;

        doc.map(|d| from_document(d, None)).transpose()
    }
}
