//! Service configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy` when not running on EC2). Secrets that
//! are absent from the environment are resolved from AWS SSM Parameter
//! Store, matching how the deployed instance is provisioned.

use std::net::SocketAddr;

use crate::error::ServiceError;
use crate::secrets::{self, ParameterStore};

/// Default AWS region for S3 and Parameter Store access.
pub const DEFAULT_AWS_REGION: &str = "us-west-1";

/// Default key prefix of the StatsBomb open-data layout inside the bucket.
pub const DEFAULT_S3_PREFIX: &str = "open-data/data/";

/// Top-level service configuration.
///
/// Loaded once at startup via [`AppConfig::load`].
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Socket address to bind the HTTP server to (e.g. `0.0.0.0:8000`).
    pub listen_addr: SocketAddr,

    /// PostgreSQL connection string.
    pub database_url: String,

    /// Maximum number of database connections in the pool.
    pub database_max_connections: u32,

    /// Minimum idle connections in the pool.
    pub database_min_connections: u32,

    /// Timeout in seconds for acquiring a database connection.
    pub database_connect_timeout_secs: u64,

    /// AWS region for S3 and SSM clients.
    pub aws_region: String,

    /// Open-data bucket name. `None` until resolved; only the loader
    /// binary requires it.
    pub s3_bucket: Option<String>,

    /// Key prefix of the open-data layout inside the bucket.
    pub s3_prefix: String,
}

impl AppConfig {
    /// Loads configuration from environment variables, resolving missing
    /// secrets (`DATABASE_URL`, `S3_BUCKET_NAME`) from AWS SSM Parameter
    /// Store.
    ///
    /// A `.env` file is consulted via `dotenvy` unless `RUNNING_ON_EC2`
    /// is set; on the instance, real environment plus SSM is the source
    /// of truth.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Config`] if `LISTEN_ADDR` does not parse
    /// as a socket address, or if `DATABASE_URL` is missing from both the
    /// environment and Parameter Store.
    pub async fn load() -> Result<Self, ServiceError> {
        if std::env::var("RUNNING_ON_EC2").is_err() {
            dotenvy::dotenv().ok();
        }

        let listen_addr: SocketAddr = std::env::var("LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8000".to_string())
            .parse()
            .map_err(|e| ServiceError::Config(format!("invalid LISTEN_ADDR: {e}")))?;

        let aws_region =
            std::env::var("AWS_REGION").unwrap_or_else(|_| DEFAULT_AWS_REGION.to_string());
        let s3_prefix =
            std::env::var("S3_PREFIX").unwrap_or_else(|_| DEFAULT_S3_PREFIX.to_string());

        let database_url = match std::env::var("DATABASE_URL") {
            Ok(url) => url,
            // Only reach for Parameter Store when the environment has no
            // answer; the env always wins.
            Err(_) => {
                ParameterStore::connect(&aws_region)
                    .await
                    .fetch(secrets::DATABASE_URL_PARAM)
                    .await?
            }
        };
        let s3_bucket = std::env::var("S3_BUCKET_NAME").ok();

        Ok(Self {
            listen_addr,
            database_url,
            database_max_connections: parse_env("DATABASE_MAX_CONNECTIONS", 10),
            database_min_connections: parse_env("DATABASE_MIN_CONNECTIONS", 2),
            database_connect_timeout_secs: parse_env("DATABASE_CONNECT_TIMEOUT_SECS", 5),
            aws_region,
            s3_bucket,
            s3_prefix,
        })
    }

    /// Resolves the open-data bucket name: `S3_BUCKET_NAME` from the
    /// environment, else Parameter Store. Only the loader calls this;
    /// the server never needs bucket access.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Config`] when the bucket is resolvable
    /// neither from the environment nor from Parameter Store.
    pub async fn resolve_bucket(&self) -> Result<String, ServiceError> {
        match &self.s3_bucket {
            Some(bucket) => Ok(bucket.clone()),
            None => {
                ParameterStore::connect(&self.aws_region)
                    .await
                    .fetch(secrets::S3_BUCKET_PARAM)
                    .await
            }
        }
    }
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_env_falls_back_on_missing() {
        assert_eq!(parse_env("FOOTBALL_TEST_UNSET_KEY", 7_u32), 7);
        assert_eq!(parse_env("FOOTBALL_TEST_UNSET_KEY", 1.5_f64), 1.5);
    }

    #[tokio::test]
    async fn resolve_bucket_prefers_env_value() {
        let cfg = AppConfig {
            listen_addr: "0.0.0.0:8000".parse().unwrap_or_else(|_| unreachable!()),
            database_url: "postgres://localhost/football".to_string(),
            database_max_connections: 10,
            database_min_connections: 2,
            database_connect_timeout_secs: 5,
            aws_region: DEFAULT_AWS_REGION.to_string(),
            s3_bucket: Some("my-open-data-mirror".to_string()),
            s3_prefix: DEFAULT_S3_PREFIX.to_string(),
        };
        let Ok(bucket) = cfg.resolve_bucket().await else {
            unreachable!("env-provided bucket should resolve");
        };
        assert_eq!(bucket, "my-open-data-mirror");
    }
}
