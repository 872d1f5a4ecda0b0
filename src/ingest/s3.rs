//! S3 access to the StatsBomb open-data mirror.
//!
//! Key layout under the configured prefix:
//!
//! ```text
//! competitions.json
//! matches/{competition_id}/{season_id}.json
//! lineups/{match_id}.json
//! events/{match_id}.json
//! ```

use aws_config::{BehaviorVersion, Region};
use serde::de::DeserializeOwned;

use super::IngestError;

/// Read-only client for the open-data bucket.
///
/// Credentials resolve through the SDK default provider chain (static
/// env keys locally, the instance role on EC2).
#[derive(Debug, Clone)]
pub struct OpenDataStore {
    client: aws_sdk_s3::Client,
    bucket: String,
    prefix: String,
}

impl OpenDataStore {
    /// Builds an S3 client for the given region, bucket, and key prefix.
    pub async fn connect(region: &str, bucket: &str, prefix: &str) -> Self {
        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .load()
            .await;
        Self {
            client: aws_sdk_s3::Client::new(&config),
            bucket: bucket.to_string(),
            prefix: prefix.to_string(),
        }
    }

    /// Key of the competitions index.
    #[must_use]
    pub fn competitions_key(&self) -> String {
        format!("{}competitions.json", self.prefix)
    }

    /// Key of one season's match file.
    #[must_use]
    pub fn matches_key(&self, competition_id: i32, season_id: i32) -> String {
        format!("{}matches/{competition_id}/{season_id}.json", self.prefix)
    }

    /// Key of one match's lineup file.
    #[must_use]
    pub fn lineups_key(&self, match_id: i64) -> String {
        format!("{}lineups/{match_id}.json", self.prefix)
    }

    /// Key of one match's event file.
    #[must_use]
    pub fn events_key(&self, match_id: i64) -> String {
        format!("{}events/{match_id}.json", self.prefix)
    }

    /// Fetches an object and decodes its body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::Fetch`] when the object cannot be read and
    /// [`IngestError::Decode`] when the body is not the expected shape.
    pub async fn fetch_json<T: DeserializeOwned>(&self, key: &str) -> Result<T, IngestError> {
        let object = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| IngestError::Fetch {
                key: key.to_string(),
                message: e.to_string(),
            })?;

        let body = object
            .body
            .collect()
            .await
            .map_err(|e| IngestError::Fetch {
                key: key.to_string(),
                message: e.to_string(),
            })?;

        serde_json::from_slice(&body.into_bytes()).map_err(|e| IngestError::Decode {
            key: key.to_string(),
            message: e.to_string(),
        })
    }
}
