//! shop-api server binary
//!
//! Configuration comes from `SHOP_CONFIG` (YAML) and the environment, see
//! [`shop::config::AppConfig`]. Log verbosity follows `RUST_LOG`.

use anyhow::Result;
use shop::config::{AppConfig, StorageKind};
use shop::core::service::StockStore;
use shop::server::ServerBuilder;
use shop::storage::{InMemoryStore, seed};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = AppConfig::load()?;
    tracing::info!(
        storage = ?config.storage,
        policy = ?config.status_policy,
        "starting shop-api"
    );

    let builder = ServerBuilder::new().with_status_policy(config.status_policy);
    let builder = match config.storage {
        StorageKind::Memory => {
            let store = Arc::new(InMemoryStore::new());
            seed_from_config(&config, store.as_ref()).await?;
            builder.with_shared_store(store)
        }
        StorageKind::Mongodb => {
            let store = Arc::new(connect_mongo(&config).await?);
            seed_from_config(&config, store.as_ref()).await?;
            builder.with_shared_store(store)
        }
    };

    builder.serve(&config.bind_address).await
}

async fn seed_from_config(config: &AppConfig, store: &dyn StockStore) -> Result<()> {
    if let Some(path) = &config.seed_file {
        let products = seed::load_products(path)?;
        seed::seed_products(store, products).await?;
    }
    Ok(())
}

#[cfg(feature = "mongodb_backend")]
async fn connect_mongo(config: &AppConfig) -> Result<shop::storage::MongoStore> {
    let strategy = shop::config::connection_strategy(config)?;
    tracing::info!(uri = %strategy.redacted(), database = %config.database_name, "connecting to MongoDB");

    let client = mongodb::Client::with_uri_str(strategy.connection_string()?).await?;
    let store = shop::storage::MongoStore::new(client.database(&config.database_name));
    store.ensure_indexes().await?;
    Ok(store)
}

#[cfg(not(feature = "mongodb_backend"))]
async fn connect_mongo(_config: &AppConfig) -> Result<InMemoryStore> {
    anyhow::bail!("storage 'mongodb' requires building with the `mongodb_backend` feature")
}
