//! MongoDB connection-string strategies
//!
//! The connection string is built once at startup from [`AppConfig`]:
//! `cluster_domain == "localhost"` connects to a local server, any other
//! domain authenticates with AWS role credentials (`MONGODB-AWS`).

use super::AppConfig;
use anyhow::{Result, anyhow};

/// Produces the URI handed to the MongoDB client
pub trait ConnectionStrategy: Send + Sync {
    fn connection_string(&self) -> Result<String>;

    /// Same URI with any credentials masked, safe to log
    fn redacted(&self) -> String;
}

/// Unauthenticated local server on a given port
#[derive(Debug, Clone)]
pub struct LocalConnection {
    pub port: u16,
}

impl ConnectionStrategy for LocalConnection {
    fn connection_string(&self) -> Result<String> {
        Ok(format!("mongodb://localhost:{}", self.port))
    }

    fn redacted(&self) -> String {
        format!("mongodb://localhost:{}", self.port)
    }
}

/// A matched set of AWS credentials for the current user or role
#[derive(Clone)]
pub struct AwsCredentials {
    pub access_key: String,
    pub secret_key: String,
    pub session_token: String,
}

impl std::fmt::Debug for AwsCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwsCredentials")
            .field("access_key", &self.access_key)
            .field("secret_key", &"***")
            .field("session_token", &"***")
            .finish()
    }
}

impl AwsCredentials {
    /// Read credentials from the standard AWS environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |name: &str| lookup(name).ok_or_else(|| anyhow!("{} is not set", name));
        Ok(Self {
            access_key: var("AWS_ACCESS_KEY_ID")?,
            secret_key: var("AWS_SECRET_ACCESS_KEY")?,
            session_token: var("AWS_SESSION_TOKEN")?,
        })
    }
}

/// SRV connection to a managed cluster, authenticated with AWS role credentials
#[derive(Debug, Clone)]
pub struct AwsRoleConnection {
    pub cluster_domain: String,
    pub credentials: AwsCredentials,
}

impl AwsRoleConnection {
    fn uri(&self, key: &str, secret: &str, token: &str) -> String {
        format!(
            "mongodb+srv://{}:{}@{}/?authSource=%24external&authMechanism=MONGODB-AWS\
             &retryWrites=true&w=majority&authMechanismProperties=AWS_SESSION_TOKEN:{}",
            key, secret, self.cluster_domain, token
        )
    }
}

impl ConnectionStrategy for AwsRoleConnection {
    fn connection_string(&self) -> Result<String> {
        Ok(self.uri(
            &url_encode(&self.credentials.access_key),
            &url_encode(&self.credentials.secret_key),
            &url_encode(&self.credentials.session_token),
        ))
    }

    fn redacted(&self) -> String {
        self.uri("***", "***", "***")
    }
}

/// Pick the strategy for `config`, reading AWS credentials when needed
pub fn connection_strategy(config: &AppConfig) -> Result<Box<dyn ConnectionStrategy>> {
    if config.cluster_domain == "localhost" {
        Ok(Box::new(LocalConnection {
            port: config.mongo_port,
        }))
    } else {
        Ok(Box::new(AwsRoleConnection {
            cluster_domain: config.cluster_domain.clone(),
            credentials: AwsCredentials::from_env()?,
        }))
    }
}

/// Form-style percent encoding: unreserved characters pass through, space
/// becomes `+`, everything else is `%XX` per UTF-8 byte
fn url_encode(s: &str) -> String {
    let mut result = String::with_capacity(s.len() * 3);
    for c in s.chars() {
        match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_' | '.' | '~' => result.push(c),
            ' ' => result.push('+'),
            _ => {
                let mut buf = [0u8; 4];
                for byte in c.encode_utf8(&mut buf).as_bytes() {
                    result.push_str(&format!("%{:02X}", byte));
                }
            }
        }
    }
    result
}
