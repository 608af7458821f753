//! Collection and video management
//!
//! Both resources share one dispatcher: the action resolves to a verb and a
//! path below `api/collections` or `api/videos`, then a single request is sent.

use reqwest::Method;
use serde_json::{json, Value};
use tracing::{debug, instrument};

use super::{failed, StorageClient};
use crate::domain::{CollectionAction, Route, VideoAction};
use crate::error::BunnyResult;

impl StorageClient {
    /// Run a collection action
    ///
    /// `collection_id` is required by `update`, `delete` and `get`. `data` is
    /// sent as the JSON body.
    #[instrument(skip(self, action, data), fields(action = %action))]
    pub async fn manage_collection(
        &self,
        action: CollectionAction,
        collection_id: Option<&str>,
        data: Option<&Value>,
    ) -> BunnyResult<Value> {
        let route = action
            .route(collection_id)
            .map_err(|e| failed("collection", e))?;
        self.dispatch("collections", "collection", route, data).await
    }

    /// Run a video action
    ///
    /// `deleteCaption` takes the caption code from `data.captionId`.
    #[instrument(skip(self, action, data), fields(action = %action))]
    pub async fn manage_video(
        &self,
        action: VideoAction,
        video_id: Option<&str>,
        data: Option<&Value>,
    ) -> BunnyResult<Value> {
        let route = action
            .route(video_id, data)
            .map_err(|e| failed("video", e))?;
        self.dispatch("videos", "video", route, data).await
    }

    async fn dispatch(
        &self,
        resource: &'static str,
        operation: &'static str,
        route: Route,
        data: Option<&Value>,
    ) -> BunnyResult<Value> {
        let url = format!("{}{}", self.api_url(resource), route.path);
        debug!(method = %route.method, url = %url, "BunnyCDN {} request", operation);

        let mut request = self.http.request(route.method.clone(), &url);

        // POST and PATCH always carry a body, `{}` if the caller gave none
        match data {
            Some(body) => request = request.json(body),
            None if route.method == Method::POST || route.method == Method::PATCH => {
                request = request.json(&json!({}));
            }
            None => {}
        }

        self.execute_json(operation, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::error::BunnyError;

    fn client() -> StorageClient {
        // Unroutable endpoint: any request that escapes validation fails with Http
        StorageClient::new(
            ClientConfig::new("K", "Z").with_api_endpoint("http://127.0.0.1:9/api"),
        )
        .unwrap()
    }

    #[test]
    fn test_missing_id_rejected_before_request() {
        let client = client();
        let result = tokio_test::block_on(client.manage_collection(CollectionAction::Get, None, None));
        assert!(matches!(result, Err(BunnyError::MissingId { action: "get" })));
    }

    #[test]
    fn test_delete_caption_without_caption_id_rejected() {
        let client = client();
        let data = json!({ "label": "en" });
        let result = tokio_test::block_on(client.manage_video(
            VideoAction::DeleteCaption,
            Some("v1"),
            Some(&data),
        ));
        assert!(matches!(result, Err(BunnyError::MissingField { field: "captionId" })));
    }
}
