//! BunnyCDN HTTP client
//!
//! [`StorageClient`] issues exactly one HTTP request per operation against
//! either the per-zone storage endpoint or the general API endpoint.
//!
//! ```text
//!                 ┌───────────────────┐
//!                 │   StorageClient   │
//!                 └─────────┬─────────┘
//!              ┌────────────┴─────────────┐
//!   https://{region}.storage          https://bunnycdn.com/api/
//!     .bunnycdn.com/{zone}/        billing, statistics, purge,
//!   upload, download, list,        collections, videos
//!   delete
//! ```

mod account;
mod media;
mod storage;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error};

use crate::config::ClientConfig;
use crate::domain::path::encode_remote_path;
use crate::error::{BunnyError, BunnyResult};

/// Longest body excerpt included in parse errors
const BODY_EXCERPT_CHARS: usize = 500;

/// Client for BunnyCDN storage and API endpoints
///
/// Cheap to clone; clones share the connection pool and configuration.
#[derive(Clone)]
pub struct StorageClient {
    /// Inner HTTP client, sends `AccessKey` by default
    http: Client,

    /// Immutable configuration
    config: Arc<ClientConfig>,

    /// `https://{region}.storage.bunnycdn.com/{zone}/`
    storage_base: String,

    /// `https://bunnycdn.com/api/`
    api_base: String,
}

impl StorageClient {
    /// Create a new client
    ///
    /// Validates the configuration; performs no network I/O.
    pub fn new(config: ClientConfig) -> BunnyResult<Self> {
        config.validate()?;

        let mut access_key = HeaderValue::from_str(&config.access_key)
            .map_err(|_| BunnyError::Config("access_key is not a valid header value".to_string()))?;
        access_key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        // Sent as `AccessKey`; header names are case-insensitive
        headers.insert(HeaderName::from_static("accesskey"), access_key);

        let user_agent = config
            .user_agent
            .clone()
            .unwrap_or_else(|| format!("bunnycdn-client/{}", env!("CARGO_PKG_VERSION")));

        let http = Client::builder()
            .default_headers(headers)
            .user_agent(user_agent)
            .build()?;

        let storage_base = config.storage_base_url();
        let api_base = config.api_base_url();

        debug!(
            storage_base = %storage_base,
            api_base = %api_base,
            "Created BunnyCDN client"
        );

        Ok(StorageClient {
            http,
            config: Arc::new(config),
            storage_base,
            api_base,
        })
    }

    /// Create a client from `BUNNYCDN_*` environment variables
    pub fn from_env() -> BunnyResult<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    /// Get the configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the storage zone name
    pub fn storage_zone(&self) -> &str {
        &self.config.storage_zone_name
    }

    /// Full storage URL for a remote path
    ///
    /// Fails with [`BunnyError::InvalidPath`] for paths containing `.` or `..`
    /// segments, which would otherwise resolve outside the storage zone.
    pub fn storage_url(&self, remote_path: &str) -> BunnyResult<String> {
        Ok(format!("{}{}", self.storage_base, encode_remote_path(remote_path)?))
    }

    /// Full API URL for a path below the API root
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path.trim_start_matches('/'))
    }

    /// Send a request and turn non-success statuses into [`BunnyError::Api`]
    ///
    /// Failures are logged before they are returned.
    async fn execute(&self, operation: &'static str, request: RequestBuilder) -> BunnyResult<Response> {
        let response = request
            .send()
            .await
            .map_err(|e| failed(operation, BunnyError::Http(e)))?;

        let status = response.status();
        debug!(operation, status = status.as_u16(), "BunnyCDN response");

        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    debug!(operation, error = %e, "Failed to read error response body");
                    String::new()
                }
            };
            return Err(failed(
                operation,
                BunnyError::Api {
                    status: status.as_u16(),
                    body,
                },
            ));
        }

        Ok(response)
    }

    /// Send a request and parse its JSON body
    async fn execute_json<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        request: RequestBuilder,
    ) -> BunnyResult<T> {
        let response = self.execute(operation, request).await?;
        let text = response
            .text()
            .await
            .map_err(|e| failed(operation, BunnyError::Http(e)))?;

        parse_body(&text).map_err(|e| failed(operation, e))
    }
}

impl std::fmt::Debug for StorageClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageClient")
            .field("storage_base", &self.storage_base)
            .field("api_base", &self.api_base)
            .finish()
    }
}

/// Log a failed operation and hand the error back
fn failed(operation: &'static str, err: BunnyError) -> BunnyError {
    match &err {
        BunnyError::Api { status, body } => {
            error!(operation, status, body = %body, "BunnyCDN request failed");
        }
        other => {
            error!(operation, error = %other, "BunnyCDN request failed");
        }
    }
    err
}

/// Parse a JSON body; an empty body reads as `null`
fn parse_body<T: DeserializeOwned>(text: &str) -> BunnyResult<T> {
    if text.trim().is_empty() {
        return serde_json::from_value(Value::Null)
            .map_err(|e| BunnyError::Parse(format!("empty response body: {}", e)));
    }

    serde_json::from_str(text).map_err(|e| {
        let excerpt: String = text.chars().take(BODY_EXCERPT_CHARS).collect();
        BunnyError::Parse(format!("JSON parse error: {} - Body: {}", e, excerpt))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> StorageClient {
        StorageClient::new(ClientConfig::new("K", "Z").with_region("la")).unwrap()
    }

    #[test]
    fn test_storage_url_for_listing_root() {
        assert_eq!(client().storage_url("").unwrap(), "https://la.storage.bunnycdn.com/Z/");
    }

    #[test]
    fn test_storage_url_for_object() {
        assert_eq!(
            client().storage_url("/docs/read me.txt").unwrap(),
            "https://la.storage.bunnycdn.com/Z/docs/read%20me.txt"
        );
    }

    #[test]
    fn test_storage_url_rejects_escape_from_zone() {
        let client = client();
        assert!(matches!(
            client.storage_url("../other/x"),
            Err(BunnyError::InvalidPath(_))
        ));
        assert!(client.storage_url("docs/%2E%2E/x").is_err());
    }

    #[test]
    fn test_api_url() {
        let client = client();
        assert_eq!(client.api_url("billing"), "https://bunnycdn.com/api/billing");
        assert_eq!(client.api_url("/videos"), "https://bunnycdn.com/api/videos");
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        assert!(StorageClient::new(ClientConfig::new("", "Z")).is_err());
        assert!(matches!(
            StorageClient::new(ClientConfig::new("bad\nkey", "Z")),
            Err(BunnyError::Config(_))
        ));
    }

    #[test]
    fn test_debug_hides_access_key() {
        let rendered = format!("{:?}", client());
        assert!(!rendered.contains("\"K\""));
        assert!(rendered.contains("la.storage.bunnycdn.com"));
    }

    #[test]
    fn test_parse_body() {
        let value: Value = parse_body("").unwrap();
        assert_eq!(value, Value::Null);

        let value: Value = parse_body(r#"{"Balance": 12.5}"#).unwrap();
        assert_eq!(value["Balance"], 12.5);

        let err = parse_body::<Value>("<html>").unwrap_err();
        assert!(matches!(err, BunnyError::Parse(_)));
    }
}
