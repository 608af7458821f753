//! BunnyCDN client
//!
//! Async client for BunnyCDN edge storage and the general BunnyCDN API.
//! Every operation issues a single HTTP request; errors are logged through
//! `tracing` and returned to the caller.
//!
//! ```no_run
//! use bunnycdn_client::{ClientConfig, StorageClient, VideoAction};
//!
//! # async fn run() -> bunnycdn_client::BunnyResult<()> {
//! let client = StorageClient::new(ClientConfig::new("access-key", "my-zone").with_region("la"))?;
//!
//! client.upload("./logo.png", "images/logo.png").await?;
//! for entry in client.list("images/").await? {
//!     println!("{} ({:?} bytes)", entry.name(), entry.length);
//! }
//!
//! let video = client.manage_video(VideoAction::Get, Some("video-id"), None).await?;
//! println!("{}", video);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod domain;
pub mod error;

pub use crate::client::StorageClient;
pub use crate::config::ClientConfig;
pub use crate::domain::{CollectionAction, PurgeRequest, Route, StorageObject, VideoAction};
pub use crate::error::{BunnyError, BunnyResult};
