//! Object storage client for order images.
//!
//! Talks to the hosted bucket's REST API: one PUT-style upload per file,
//! returning the publicly resolvable URL. Uploads are single-attempt; any
//! retry policy is the caller's concern (today: none anywhere).

use rand::distr::{Alphanumeric, SampleString};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::config::StorageConfig;

/// Length of the random suffix in generated object names.
const NAME_SUFFIX_LEN: usize = 6;

/// Errors from the object storage collaborator.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The request could not be sent.
    #[error("storage request failed: {0}")]
    Request(String),
    /// The storage service answered with a non-success status.
    #[error("storage rejected upload ({status}): {body}")]
    Rejected {
        status: u16,
        body: String,
    },
}

/// Client for the hosted object storage bucket.
#[derive(Clone)]
pub struct StorageClient {
    client: Client,
    endpoint: String,
    bucket: String,
    access_key: SecretString,
}

impl std::fmt::Debug for StorageClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageClient")
            .field("endpoint", &self.endpoint)
            .field("bucket", &self.bucket)
            .field("access_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl StorageClient {
    /// Create a new storage client from configuration.
    #[must_use]
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            client: Client::new(),
            endpoint: config.endpoint.clone(),
            bucket: config.bucket.clone(),
            access_key: config.access_key.clone(),
        }
    }

    /// Upload one object and return its public URL.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the service rejects the upload.
    #[instrument(skip(self, bytes), fields(object = %object_name, len = bytes.len()))]
    pub async fn upload(
        &self,
        object_name: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError> {
        let upload_url = format!(
            "{}/object/{}/{}",
            self.endpoint, self.bucket, object_name
        );

        let response = self
            .client
            .post(&upload_url)
            .bearer_auth(self.access_key.expose_secret())
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await
            .map_err(|e| StorageError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StorageError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let public_url = self.public_url(object_name);
        debug!(url = %public_url, "Object uploaded");
        Ok(public_url)
    }

    /// The publicly resolvable URL for an object in the bucket.
    #[must_use]
    pub fn public_url(&self, object_name: &str) -> String {
        format!(
            "{}/object/public/{}/{}",
            self.endpoint, self.bucket, object_name
        )
    }
}

/// Generate a collision-resistant object name for an uploaded file.
///
/// `{unix-millis}_{random-suffix}.{ext}`, preserving the original file
/// extension when present.
#[must_use]
pub fn object_name(original_filename: &str) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let suffix = Alphanumeric.sample_string(&mut rand::rng(), NAME_SUFFIX_LEN);

    match original_filename.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => {
            format!("{millis}_{suffix}.{ext}")
        }
        _ => format!("{millis}_{suffix}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_name_preserves_extension() {
        let name = object_name("IMG_2041.jpeg");
        assert!(name.ends_with(".jpeg"));
        assert!(!name.contains("IMG_2041"));
    }

    #[test]
    fn test_object_name_without_extension() {
        let name = object_name("photo");
        assert!(!name.contains('.'));
    }

    #[test]
    fn test_object_name_hidden_file_not_treated_as_extension() {
        // ".gitignore"-style names have no stem, so no extension is kept.
        let name = object_name(".hidden");
        assert!(!name.ends_with(".hidden"));
    }

    #[test]
    fn test_object_names_are_unique_enough() {
        let a = object_name("a.png");
        let b = object_name("a.png");
        assert_ne!(a, b);
    }

    #[test]
    fn test_public_url_shape() {
        let client = StorageClient::new(&StorageConfig {
            endpoint: "https://storage.example.dev".to_string(),
            bucket: "order-images".to_string(),
            access_key: SecretString::from("key"),
        });
        assert_eq!(
            client.public_url("123_abc.jpg"),
            "https://storage.example.dev/object/public/order-images/123_abc.jpg"
        );
    }

    #[test]
    fn test_debug_redacts_access_key() {
        let client = StorageClient::new(&StorageConfig {
            endpoint: "https://storage.example.dev".to_string(),
            bucket: "order-images".to_string(),
            access_key: SecretString::from("very_private_key"),
        });
        let output = format!("{client:?}");
        assert!(output.contains("[REDACTED]"));
        assert!(!output.contains("very_private_key"));
    }
}
