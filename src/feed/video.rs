//! Video Feed Controller
//!
//! Maintains a `FeedState<VideoAnalysisResult>` for the currently selected
//! webcam. Same shape as the wave controller but with a much shorter poll
//! interval (the pipeline status changes quickly while spinning up) and a
//! pre-switch teardown: deselecting a webcam fires one best-effort
//! stop-analysis request so the backend can release its pipeline.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, RwLock};

use super::{FeedError, FeedState, SourceError, VideoSource};
use crate::data::VideoAnalysisResult;

/// Polls a [`VideoSource`] for the selected webcam and publishes results.
pub struct VideoFeedController {
    source: Arc<dyn VideoSource>,
    poll_interval: Duration,
    selected: RwLock<Option<String>>,
    epoch: Arc<AtomicU64>,
    tx: watch::Sender<FeedState<VideoAnalysisResult>>,
}

impl VideoFeedController {
    /// Create a controller with no webcam selected.
    pub fn new(source: Arc<dyn VideoSource>, poll_interval: Duration) -> Self {
        let (tx, _) = watch::channel(FeedState::Idle);
        Self {
            source,
            poll_interval,
            selected: RwLock::new(None),
            epoch: Arc::new(AtomicU64::new(0)),
            tx,
        }
    }

    /// Latest published state.
    pub fn current_state(&self) -> FeedState<VideoAnalysisResult> {
        self.tx.borrow().clone()
    }

    /// Subscribe to state changes. Dropping the receiver unsubscribes.
    pub fn subscribe(&self) -> watch::Receiver<FeedState<VideoAnalysisResult>> {
        self.tx.subscribe()
    }

    /// Point the controller at a different webcam, or at none.
    ///
    /// Selecting the current webcam is a no-op and in particular must not
    /// re-fire the stop-analysis side effect. A real change away from a
    /// previously selected webcam fires exactly one fire-and-forget
    /// teardown request for it; teardown failure is logged and never blocks
    /// or fails the switch. Staleness is handled exactly as in the wave
    /// controller, keyed on the selection epoch.
    pub async fn select(&self, webcam_id: Option<&str>) {
        let mut selected = self.selected.write().await;
        if selected.as_deref() == webcam_id {
            return;
        }
        let previous = selected.take();
        *selected = webcam_id.map(str::to_owned);

        // Bump and idle publish are atomic against the poll loop's publish
        // gate; see the wave controller for the interleaving this closes.
        let mut epoch = 0;
        self.tx.send_if_modified(|state| {
            epoch = self.epoch.fetch_add(1, Ordering::AcqRel) + 1;
            *state = FeedState::Idle;
            true
        });

        if let Some(previous) = previous {
            let source = self.source.clone();
            tokio::spawn(async move {
                match source.stop_analysis(&previous).await {
                    Ok(()) => {
                        tracing::info!(webcam_id = %previous, "stopped previous analysis")
                    }
                    Err(error) => {
                        tracing::warn!(
                            webcam_id = %previous,
                            error = %error,
                            "failed to stop previous analysis"
                        )
                    }
                }
            });
        }

        let Some(webcam_id) = webcam_id else {
            tracing::info!("video feed idle, polling stopped");
            return;
        };

        tracing::info!(
            webcam_id = %webcam_id,
            interval_secs = self.poll_interval.as_secs(),
            "starting video poll loop"
        );
        tokio::spawn(poll_loop(
            self.source.clone(),
            webcam_id.to_owned(),
            epoch,
            self.epoch.clone(),
            self.poll_interval,
            self.tx.clone(),
        ));
    }
}

async fn poll_loop(
    source: Arc<dyn VideoSource>,
    webcam_id: String,
    my_epoch: u64,
    live_epoch: Arc<AtomicU64>,
    interval: Duration,
    tx: watch::Sender<FeedState<VideoAnalysisResult>>,
) {
    let mut ticker = tokio::time::interval(interval);
    loop {
        ticker.tick().await;
        if live_epoch.load(Ordering::Acquire) != my_epoch {
            return;
        }

        let outcome = source.fetch_analysis(&webcam_id).await;

        // First discard opportunity; the publish gate below is authoritative.
        if live_epoch.load(Ordering::Acquire) != my_epoch {
            tracing::debug!(webcam_id = %webcam_id, "discarding stale video response");
            return;
        }

        let state = match outcome {
            Ok(result) => {
                tracing::debug!(
                    webcam_id = %webcam_id,
                    status = result.status.label(),
                    surfer_count = result.surfer_count,
                    "video analysis updated"
                );
                FeedState::Ready(result)
            }
            Err(SourceError::Server(message)) => {
                tracing::warn!(webcam_id = %webcam_id, error = %message, "video backend reported an error");
                FeedState::Failed(FeedError::Server(format!("Webcam Error: {message}")))
            }
            Err(error) => {
                tracing::error!(webcam_id = %webcam_id, error = %error, "video fetch failed");
                FeedState::Failed(FeedError::Transport(
                    "Failed to fetch webcam data".to_string(),
                ))
            }
        };

        let published = tx.send_if_modified(|slot| {
            if live_epoch.load(Ordering::Acquire) != my_epoch {
                return false;
            }
            *slot = state;
            true
        });
        if !published {
            tracing::debug!(webcam_id = %webcam_id, "discarding stale video response");
            return;
        }
    }
}
