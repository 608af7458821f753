//! Client configuration
//!
//! A [`ClientConfig`] is a plain value: building one never touches the network.
//! It can be assembled in code or loaded from files and the environment.

use config::{Config, Environment, File};
use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;

use crate::error::{BunnyError, BunnyResult};

/// Storage region used when none is configured
pub const DEFAULT_REGION: &str = "ny";

/// General API endpoint used when none is configured
pub const DEFAULT_API_ENDPOINT: &str = "https://bunnycdn.com/api";

/// Configuration for a [`crate::StorageClient`]
#[derive(Clone, Deserialize)]
pub struct ClientConfig {
    /// Secret sent in the `AccessKey` header of every request
    pub access_key: String,

    /// Storage zone name, used as the first path segment on the storage endpoint
    pub storage_zone_name: String,

    /// Storage region subdomain (`ny`, `la`, `sg`, ...)
    #[serde(default = "default_region")]
    pub region: String,

    /// Overrides `https://{region}.storage.bunnycdn.com`
    #[serde(default)]
    pub storage_endpoint: Option<String>,

    /// Overrides `https://bunnycdn.com/api`
    #[serde(default)]
    pub api_endpoint: Option<String>,

    /// Send a SHA-256 `Checksum` header with uploads
    #[serde(default)]
    pub checksum_uploads: bool,

    /// Custom User-Agent header
    #[serde(default)]
    pub user_agent: Option<String>,
}

fn default_region() -> String {
    DEFAULT_REGION.to_string()
}

impl ClientConfig {
    /// Create a config for a storage zone in the default region
    pub fn new(access_key: impl Into<String>, storage_zone_name: impl Into<String>) -> Self {
        ClientConfig {
            access_key: access_key.into(),
            storage_zone_name: storage_zone_name.into(),
            region: default_region(),
            storage_endpoint: None,
            api_endpoint: None,
            checksum_uploads: false,
            user_agent: None,
        }
    }

    /// Set the storage region
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    /// Point storage operations at a custom host instead of the regional edge
    pub fn with_storage_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.storage_endpoint = Some(endpoint.into());
        self
    }

    /// Point API operations at a custom base URL
    pub fn with_api_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.api_endpoint = Some(endpoint.into());
        self
    }

    /// Enable or disable upload checksums
    pub fn with_checksum_uploads(mut self, enabled: bool) -> Self {
        self.checksum_uploads = enabled;
        self
    }

    /// Set a custom User-Agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Load configuration from files and environment variables
    ///
    /// Configuration priority (highest to lowest):
    /// 1. Environment variables (prefixed with BUNNYCDN_, `.env` is read first)
    /// 2. config/local.toml (gitignored)
    /// 3. config/default.toml
    pub fn load() -> BunnyResult<Self> {
        dotenvy::dotenv().ok();

        let config_dir = std::env::var("CONFIG_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("config"));

        let builder = Config::builder()
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            .add_source(File::from(config_dir.join("local.toml")).required(false))
            .add_source(env_source());

        let config: ClientConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> BunnyResult<Self> {
        dotenvy::dotenv().ok();

        let config: ClientConfig = Config::builder()
            .add_source(env_source())
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Check required fields and endpoint overrides
    pub fn validate(&self) -> BunnyResult<()> {
        if self.access_key.trim().is_empty() {
            return Err(BunnyError::Config("access_key is required".to_string()));
        }
        if self.storage_zone_name.trim().is_empty() {
            return Err(BunnyError::Config("storage_zone_name is required".to_string()));
        }
        if self.region.trim().is_empty() {
            return Err(BunnyError::Config("region must not be empty".to_string()));
        }

        for endpoint in [&self.storage_endpoint, &self.api_endpoint].into_iter().flatten() {
            let parsed = url::Url::parse(endpoint)
                .map_err(|e| BunnyError::InvalidUrl(format!("{}: {}", endpoint, e)))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(BunnyError::InvalidUrl(format!(
                    "{}: unsupported scheme '{}'",
                    endpoint,
                    parsed.scheme()
                )));
            }
        }

        Ok(())
    }

    /// Base URL for storage operations, always ending in `/`
    pub fn storage_base_url(&self) -> String {
        let host = match &self.storage_endpoint {
            Some(endpoint) => endpoint.trim_end_matches('/').to_string(),
            None => format!("https://{}.storage.bunnycdn.com", self.region),
        };
        format!("{}/{}/", host, self.storage_zone_name)
    }

    /// Base URL for general API operations, always ending in `/`
    pub fn api_base_url(&self) -> String {
        let base = self
            .api_endpoint
            .as_deref()
            .unwrap_or(DEFAULT_API_ENDPOINT)
            .trim_end_matches('/');
        format!("{}/", base)
    }
}

fn env_source() -> Environment {
    Environment::with_prefix("BUNNYCDN")
        .prefix_separator("_")
        .try_parsing(true)
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("access_key", &"<redacted>")
            .field("storage_zone_name", &self.storage_zone_name)
            .field("region", &self.region)
            .field("storage_endpoint", &self.storage_endpoint)
            .field("api_endpoint", &self.api_endpoint)
            .field("checksum_uploads", &self.checksum_uploads)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_region() {
        let config = ClientConfig::new("key", "zone");
        assert_eq!(config.region, "ny");
        assert_eq!(config.storage_base_url(), "https://ny.storage.bunnycdn.com/zone/");
        assert_eq!(config.api_base_url(), "https://bunnycdn.com/api/");
    }

    #[test]
    fn test_region_in_storage_url() {
        let config = ClientConfig::new("K", "Z").with_region("la");
        assert_eq!(config.storage_base_url(), "https://la.storage.bunnycdn.com/Z/");
    }

    #[test]
    fn test_endpoint_overrides() {
        let config = ClientConfig::new("K", "Z")
            .with_storage_endpoint("http://127.0.0.1:9000/")
            .with_api_endpoint("http://127.0.0.1:9001/api");

        assert_eq!(config.storage_base_url(), "http://127.0.0.1:9000/Z/");
        assert_eq!(config.api_base_url(), "http://127.0.0.1:9001/api/");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_missing_fields() {
        assert!(matches!(
            ClientConfig::new("", "zone").validate(),
            Err(BunnyError::Config(_))
        ));
        assert!(matches!(
            ClientConfig::new("key", "  ").validate(),
            Err(BunnyError::Config(_))
        ));
    }

    #[test]
    fn test_validate_rejects_bad_endpoint() {
        let config = ClientConfig::new("key", "zone").with_api_endpoint("not a url");
        assert!(matches!(config.validate(), Err(BunnyError::InvalidUrl(_))));

        let config = ClientConfig::new("key", "zone").with_storage_endpoint("ftp://example.com");
        assert!(matches!(config.validate(), Err(BunnyError::InvalidUrl(_))));
    }

    #[test]
    fn test_debug_redacts_access_key() {
        let config = ClientConfig::new("super-secret-key", "zone");
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("super-secret-key"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_deserialize_applies_defaults() {
        let config: ClientConfig = serde_json::from_value(serde_json::json!({
            "access_key": "key",
            "storage_zone_name": "zone"
        }))
        .unwrap();

        assert_eq!(config.region, DEFAULT_REGION);
        assert!(!config.checksum_uploads);
        assert!(config.storage_endpoint.is_none());
    }
}
