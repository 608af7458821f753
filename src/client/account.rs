//! Account-level API operations: billing, statistics, cache purge

use serde_json::Value;
use tracing::{info, instrument};

use super::StorageClient;
use crate::domain::PurgeRequest;
use crate::error::BunnyResult;

impl StorageClient {
    /// Fetch billing information, returned as the raw JSON body
    #[instrument(skip(self))]
    pub async fn get_billing(&self) -> BunnyResult<Value> {
        let url = self.api_url("billing");
        self.execute_json("billing", self.http.get(&url)).await
    }

    /// Fetch account statistics, returned as the raw JSON body
    #[instrument(skip(self))]
    pub async fn get_statistics(&self) -> BunnyResult<Value> {
        let url = self.api_url("statistics");
        self.execute_json("statistics", self.http.get(&url)).await
    }

    /// Purge a URL from the edge cache
    #[instrument(skip(self))]
    pub async fn purge_cache(&self, url: &str) -> BunnyResult<()> {
        let api_url = self.api_url("purge");
        let body = PurgeRequest::new(url);

        self.execute("purge", self.http.post(&api_url).json(&body)).await?;

        info!(url, "Cache purged successfully");
        Ok(())
    }
}
