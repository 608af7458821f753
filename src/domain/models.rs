//! BunnyCDN request and response models
//!
//! Storage listings are typed but lossless: fields this crate does not know
//! about are kept in `extra`.

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// One entry of a storage directory listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StorageObject {
    pub guid: Option<String>,
    pub storage_zone_name: Option<String>,
    /// Directory containing the object, e.g. `/zone/images/`
    pub path: Option<String>,
    pub object_name: Option<String>,
    pub length: Option<u64>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub last_changed: Option<NaiveDateTime>,
    #[serde(default)]
    pub is_directory: bool,
    pub server_id: Option<i64>,
    pub user_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub date_created: Option<NaiveDateTime>,
    pub storage_zone_id: Option<i64>,
    pub checksum: Option<String>,
    pub replicated_zones: Option<String>,

    /// Any other keys returned by the API
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl StorageObject {
    /// Object name, or an empty string if the API omitted it
    pub fn name(&self) -> &str {
        self.object_name.as_deref().unwrap_or_default()
    }

    /// Path of the object relative to the storage zone root
    ///
    /// Directories end with `/`.
    pub fn relative_path(&self) -> String {
        let dir = self.path.as_deref().unwrap_or("/").trim_start_matches('/');

        // The API prefixes the directory with the zone name
        let dir = match &self.storage_zone_name {
            Some(zone) => dir.strip_prefix(zone.as_str()).unwrap_or(dir),
            None => dir,
        };
        let dir = dir.trim_start_matches('/');

        let mut full = format!("{}{}", dir, self.name());
        if self.is_directory {
            full.push('/');
        }
        full
    }
}

/// Body of a cache purge request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurgeRequest {
    pub url: String,
}

impl PurgeRequest {
    pub fn new(url: impl Into<String>) -> Self {
        PurgeRequest { url: url.into() }
    }
}

/// Accept `2024-01-01T10:00:00.123` as well as RFC 3339 timestamps.
/// Anything else, including non-string values, becomes `None`.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Value> = Option::deserialize(deserializer)?;

    Ok(raw.as_ref().and_then(Value::as_str).and_then(|s| {
        s.parse::<NaiveDateTime>()
            .ok()
            .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.naive_utc()))
    }))
}
