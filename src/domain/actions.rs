//! Collection and video actions
//!
//! Each action maps to exactly one HTTP verb and path template. The tables
//! below are the only place that mapping lives.

use reqwest::Method;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use super::path::encode_segment;
use crate::error::{BunnyError, BunnyResult};

/// A resolved request target, relative to the resource base URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub method: Method,
    /// Path appended to the resource base, empty or starting with `/`
    pub path: String,
}

// ============================================================================
// Collections
// ============================================================================

/// Actions accepted by [`crate::StorageClient::manage_collection`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionAction {
    Create,
    Update,
    Delete,
    Get,
    List,
}

impl CollectionAction {
    /// All collection actions
    pub fn all() -> &'static [CollectionAction] {
        &[
            CollectionAction::Create,
            CollectionAction::Update,
            CollectionAction::Delete,
            CollectionAction::Get,
            CollectionAction::List,
        ]
    }

    /// Wire name of the action
    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionAction::Create => "create",
            CollectionAction::Update => "update",
            CollectionAction::Delete => "delete",
            CollectionAction::Get => "get",
            CollectionAction::List => "list",
        }
    }

    fn template(&self) -> (Method, &'static str) {
        match self {
            CollectionAction::Create => (Method::POST, ""),
            CollectionAction::Update => (Method::PATCH, "/{id}"),
            CollectionAction::Delete => (Method::DELETE, "/{id}"),
            CollectionAction::Get => (Method::GET, "/{id}"),
            CollectionAction::List => (Method::GET, ""),
        }
    }

    /// Resolve the verb and path for this action
    pub fn route(&self, collection_id: Option<&str>) -> BunnyResult<Route> {
        let (method, template) = self.template();
        let path = expand(template, self.as_str(), collection_id, None)?;
        Ok(Route { method, path })
    }
}

impl fmt::Display for CollectionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CollectionAction {
    type Err = BunnyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CollectionAction::all()
            .iter()
            .copied()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| BunnyError::UnknownAction(s.to_string()))
    }
}

// ============================================================================
// Videos
// ============================================================================

/// Actions accepted by [`crate::StorageClient::manage_video`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VideoAction {
    Create,
    Update,
    Delete,
    Get,
    List,
    Reencode,
    SetThumbnail,
    Fetch,
    AddCaption,
    DeleteCaption,
}

impl VideoAction {
    /// All video actions
    pub fn all() -> &'static [VideoAction] {
        &[
            VideoAction::Create,
            VideoAction::Update,
            VideoAction::Delete,
            VideoAction::Get,
            VideoAction::List,
            VideoAction::Reencode,
            VideoAction::SetThumbnail,
            VideoAction::Fetch,
            VideoAction::AddCaption,
            VideoAction::DeleteCaption,
        ]
    }

    /// Wire name of the action
    pub fn as_str(&self) -> &'static str {
        match self {
            VideoAction::Create => "create",
            VideoAction::Update => "update",
            VideoAction::Delete => "delete",
            VideoAction::Get => "get",
            VideoAction::List => "list",
            VideoAction::Reencode => "reencode",
            VideoAction::SetThumbnail => "setThumbnail",
            VideoAction::Fetch => "fetch",
            VideoAction::AddCaption => "addCaption",
            VideoAction::DeleteCaption => "deleteCaption",
        }
    }

    fn template(&self) -> (Method, &'static str) {
        match self {
            VideoAction::Create => (Method::POST, ""),
            VideoAction::Update => (Method::PATCH, "/{id}"),
            VideoAction::Delete => (Method::DELETE, "/{id}"),
            VideoAction::Get => (Method::GET, "/{id}"),
            VideoAction::List => (Method::GET, ""),
            VideoAction::Reencode => (Method::POST, "/{id}/reencode"),
            VideoAction::SetThumbnail => (Method::POST, "/{id}/thumbnail"),
            VideoAction::Fetch => (Method::POST, "/fetch"),
            VideoAction::AddCaption => (Method::POST, "/{id}/caption"),
            VideoAction::DeleteCaption => (Method::DELETE, "/{id}/caption/{captionId}"),
        }
    }

    /// Resolve the verb and path for this action
    ///
    /// `deleteCaption` reads `captionId` from `data`.
    pub fn route(&self, video_id: Option<&str>, data: Option<&Value>) -> BunnyResult<Route> {
        let (method, template) = self.template();
        let path = expand(template, self.as_str(), video_id, data)?;
        Ok(Route { method, path })
    }
}

impl fmt::Display for VideoAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VideoAction {
    type Err = BunnyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VideoAction::all()
            .iter()
            .copied()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| BunnyError::UnknownAction(s.to_string()))
    }
}

/// Fill `{id}` and `{captionId}` placeholders in a path template
fn expand(
    template: &str,
    action: &'static str,
    id: Option<&str>,
    data: Option<&Value>,
) -> BunnyResult<String> {
    let mut path = template.to_string();

    if path.contains("{id}") {
        let id = id
            .filter(|id| !id.is_empty())
            .ok_or(BunnyError::MissingId { action })?;
        path = path.replace("{id}", &encode_segment(id)?);
    }

    if path.contains("{captionId}") {
        let caption_id = data
            .and_then(|d| d.get("captionId"))
            .and_then(Value::as_str)
            .filter(|c| !c.is_empty())
            .ok_or(BunnyError::MissingField { field: "captionId" })?;
        path = path.replace("{captionId}", &encode_segment(caption_id)?);
    }

    Ok(path)
}
