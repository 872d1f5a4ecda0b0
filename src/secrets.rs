//! AWS SSM Parameter Store access for deployed secrets.
//!
//! The EC2 instance running the service carries no secret environment;
//! `DATABASE_URL` and the open-data bucket name live as encrypted
//! parameters under the `/football/` path.

use aws_config::{BehaviorVersion, Region};

use crate::error::ServiceError;

/// Parameter path holding the PostgreSQL connection string.
pub const DATABASE_URL_PARAM: &str = "/football/DATABASE_URL";

/// Parameter path holding the open-data bucket name.
pub const S3_BUCKET_PARAM: &str = "/football/S3_BUCKET_NAME";

/// Thin wrapper around the SSM client for decrypted parameter reads.
///
/// Credentials resolve through the SDK default provider chain, which
/// covers both static env keys and the instance role.
#[derive(Debug, Clone)]
pub struct ParameterStore {
    client: aws_sdk_ssm::Client,
}

impl ParameterStore {
    /// Builds an SSM client for the given region.
    pub async fn connect(region: &str) -> Self {
        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .load()
            .await;
        Self {
            client: aws_sdk_ssm::Client::new(&config),
        }
    }

    /// Fetches one parameter with decryption.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Config`] when the parameter is missing or
    /// the SSM call fails.
    pub async fn fetch(&self, name: &str) -> Result<String, ServiceError> {
        let response = self
            .client
            .get_parameter()
            .name(name)
            .with_decryption(true)
            .send()
            .await
            .map_err(|e| ServiceError::Config(format!("ssm get_parameter {name}: {e}")))?;

        response
            .parameter()
            .and_then(|p| p.value())
            .map(str::to_string)
            .ok_or_else(|| ServiceError::Config(format!("ssm parameter {name} has no value")))
    }
}
