//! Feed Controllers
//!
//! Each remote data source (wave buoy, webcam analysis) is owned by exactly
//! one controller. A controller runs its own fixed-interval poll loop for
//! the currently selected identifier, classifies each response, and
//! publishes the latest [`FeedState`] through a watch channel. Subscribers
//! only ever read the most recent published value; there is no loading
//! state because the prior value is retained until the next result lands.

mod video;
mod wave;

pub use video::VideoFeedController;
pub use wave::WaveFeedController;

use async_trait::async_trait;
use thiserror::Error;

use crate::data::{VideoAnalysisResult, WaveDataset};

/// Latest published value of a feed.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedState<T> {
    /// No identifier selected.
    Idle,
    /// The most recent poll succeeded.
    Ready(T),
    /// The most recent poll failed. Terminal for that cycle only; the next
    /// scheduled tick retries independently.
    Failed(FeedError),
}

impl<T> FeedState<T> {
    /// Whether no feed is active.
    pub fn is_idle(&self) -> bool {
        matches!(self, FeedState::Idle)
    }

    /// The payload of a `Ready` state, if any.
    pub fn data(&self) -> Option<&T> {
        match self {
            FeedState::Ready(data) => Some(data),
            _ => None,
        }
    }

    /// The error of a `Failed` state, if any.
    pub fn error(&self) -> Option<&FeedError> {
        match self {
            FeedState::Failed(error) => Some(error),
            _ => None,
        }
    }
}

/// User-facing classification of a failed poll.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeedError {
    /// The backend answered with an explicit error payload. The message is
    /// surfaced verbatim, prefixed per-feed for disambiguation.
    #[error("{0}")]
    Server(String),
    /// Network failure or malformed response. Carries a fixed generic
    /// message; the underlying error is logged only.
    #[error("{0}")]
    Transport(String),
}

/// What a feed source can report before the controller classifies it.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The payload carried an explicit `error` field.
    #[error("backend error: {0}")]
    Server(String),

    #[error("request timeout")]
    Timeout,

    #[error("backend unavailable")]
    Unavailable,

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Non-JSON body, or a dataset violating its shape invariants.
    #[error("malformed payload: {0}")]
    Decode(String),
}

/// Source of wave datasets, keyed by buoy identifier.
#[async_trait]
pub trait WaveSource: Send + Sync {
    async fn fetch_waves(&self, buoy_id: &str) -> Result<WaveDataset, SourceError>;
}

/// Source of video analysis summaries, keyed by webcam identifier.
#[async_trait]
pub trait VideoSource: Send + Sync {
    async fn fetch_analysis(&self, webcam_id: &str)
        -> Result<VideoAnalysisResult, SourceError>;

    /// Best-effort teardown of the server-side pipeline for a webcam.
    async fn stop_analysis(&self, webcam_id: &str) -> Result<(), SourceError>;
}
