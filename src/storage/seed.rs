//! Initial product catalogue loaded at startup

use crate::core::error::ShopError;
use crate::core::model::Product;
use crate::core::service::StockStore;
use anyhow::{Context, Result};
use std::path::Path;
use validator::Validate;

/// Parse a JSON array of products and validate each one
pub fn parse_products(json: &str) -> Result<Vec<Product>> {
    let products: Vec<Product> =
        serde_json::from_str(json).context("Seed file is not a JSON array of products")?;
    for product in &products {
        product
            .validate()
            .with_context(|| format!("Invalid seed product {}", product.product_id))?;
    }
    Ok(products)
}

pub fn load_products(path: &Path) -> Result<Vec<Product>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read seed file {}", path.display()))?;
    parse_products(&content)
}

/// Insert products that are not stored yet. Returns how many were inserted.
///
/// Existing products keep their stored `available_count`.
pub async fn seed_products(store: &dyn StockStore, products: Vec<Product>) -> Result<usize> {
    let mut inserted = 0;
    for product in products {
        let product_id = product.product_id.clone();
        match store.insert_product(product).await {
            Ok(_) => inserted += 1,
            Err(ShopError::AlreadyExists { .. }) => {
                tracing::debug!(%product_id, "seed product already present");
            }
            Err(e) => return Err(e.into()),
        }
    }
    tracing::info!(inserted, "product catalogue seeded");
    Ok(inserted)
}
