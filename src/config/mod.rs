//! Configuration loading and management
//!
//! [`AppConfig`] is read from an optional YAML file (path in `SHOP_CONFIG`)
//! and then overridden field by field from the environment.

pub mod connection;

pub use connection::{
    AwsCredentials, AwsRoleConnection, ConnectionStrategy, LocalConnection, connection_strategy,
};

use crate::core::status::StatusPolicy;
use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable holding the YAML config path
pub const CONFIG_PATH_VAR: &str = "SHOP_CONFIG";

/// Which store backs the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    #[default]
    Memory,
    Mongodb,
}

impl std::str::FromStr for StorageKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" | "in-memory" => Ok(StorageKind::Memory),
            "mongodb" | "mongo" => Ok(StorageKind::Mongodb),
            other => Err(format!("unknown storage backend '{}'", other)),
        }
    }
}

fn default_database_name() -> String {
    "ecommerce".to_string()
}

fn default_cluster_domain() -> String {
    "localhost".to_string()
}

fn default_mongo_port() -> u16 {
    27017
}

fn default_bind_address() -> String {
    "127.0.0.1:3000".to_string()
}

/// Runtime configuration of the service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_database_name")]
    pub database_name: String,

    /// `localhost` selects a local connection, anything else the AWS role one
    #[serde(default = "default_cluster_domain")]
    pub cluster_domain: String,

    #[serde(default = "default_mongo_port")]
    pub mongo_port: u16,

    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    #[serde(default)]
    pub status_policy: StatusPolicy,

    #[serde(default)]
    pub storage: StorageKind,

    /// JSON array of products inserted at startup
    #[serde(default)]
    pub seed_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_name: default_database_name(),
            cluster_domain: default_cluster_domain(),
            mongo_port: default_mongo_port(),
            bind_address: default_bind_address(),
            status_policy: StatusPolicy::default(),
            storage: StorageKind::default(),
            seed_file: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path))?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Load from `SHOP_CONFIG` (when set) then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = match std::env::var(CONFIG_PATH_VAR) {
            Ok(path) => Self::from_yaml_file(&path)?,
            Err(_) => Self::default(),
        };
        config.apply_overrides(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Override fields from variables resolved by `lookup`
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(name) = lookup("ECOMMERCE_DATABASE_NAME") {
            self.database_name = name;
        }
        if let Some(domain) = lookup("DATABASE_CLUSTER_DOMAIN") {
            self.cluster_domain = domain;
        }
        if let Some(port) = lookup("MONGO_CONNECTION_PORT") {
            self.mongo_port = port
                .parse()
                .with_context(|| format!("MONGO_CONNECTION_PORT is not a port: {}", port))?;
        }
        if let Some(addr) = lookup("SHOP_BIND_ADDRESS") {
            self.bind_address = addr;
        }
        if let Some(policy) = lookup("SHOP_STATUS_POLICY") {
            self.status_policy = policy.parse().map_err(|e: String| anyhow!(e))?;
        }
        if let Some(storage) = lookup("SHOP_STORAGE") {
            self.storage = storage.parse().map_err(|e: String| anyhow!(e))?;
        }
        if let Some(seed) = lookup("SHOP_SEED_FILE") {
            self.seed_file = Some(PathBuf::from(seed));
        }
        Ok(())
    }
}
