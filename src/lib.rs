//! # Surfwatch
//!
//! Client-side core for a surf conditions dashboard: near-real-time ocean
//! buoy measurements plus a video-derived surfer count for a user-selected
//! location pair (a buoy and, independently, a webcam analyzed by an
//! external computer-vision service).
//!
//! The heart of the crate is the polling and synchronization layer that
//! keeps two independently-cadenced, independently-selectable remote feeds
//! consistent with user selection changes. Each feed is owned by exactly
//! one controller; a late response for a deselected identifier is
//! abandoned on arrival, never published over the new selection's state.
//!
//! ## Modules
//!
//! - [`selection`]: catalogs and the current buoy/webcam identifier pair
//! - [`feed`]: the two poll-loop controllers and the published `FeedState`
//! - [`client`]: reqwest client for the backend's three endpoints
//! - [`view`]: pure dataset-to-presentation transforms
//! - [`dashboard`]: wires selection edits to controller lifecycles
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use surfwatch::{BackendClient, Config, Dashboard};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let client = Arc::new(BackendClient::new(&config.backend)?);
//!
//!     let dashboard = Dashboard::new(
//!         client.clone(),
//!         client,
//!         config.catalog.buoys.clone(),
//!         config.catalog.webcams.clone(),
//!         Duration::from_secs(config.feeds.wave_poll_secs),
//!         Duration::from_secs(config.feeds.video_poll_secs),
//!     );
//!
//!     dashboard.set_buoy(Some("273")).await;
//!     let mut waves = dashboard.subscribe_waves();
//!     waves.changed().await?;
//!     let reading = surfwatch::view::latest_reading(waves.borrow().data());
//!     println!("wave height: {}", reading.wave_height);
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod dashboard;
pub mod data;
pub mod feed;
pub mod selection;
pub mod view;

// Re-export top-level types for convenience
pub use client::BackendClient;
pub use config::{BackendConfig, CatalogConfig, Config, ConfigError, FeedsConfig, LoggingConfig};
pub use dashboard::Dashboard;
pub use data::{VideoAnalysisResult, VideoStatus, WaveDataset};
pub use feed::{
    FeedError, FeedState, SourceError, VideoFeedController, VideoSource, WaveFeedController,
    WaveSource,
};
pub use selection::{Buoy, Selection, SelectionChange, SelectionStore, Webcam};
pub use view::{chart_points, latest_reading, ChartPoint, CurrentConditions};
