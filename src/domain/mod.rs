//! Domain types and models

pub mod actions;
pub mod models;
pub mod path;

pub use actions::{CollectionAction, Route, VideoAction};
pub use models::{PurgeRequest, StorageObject};
