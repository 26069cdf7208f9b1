//! Wave Feed Controller
//!
//! Maintains a `FeedState<WaveDataset>` for the currently selected buoy.
//! Selecting a buoy issues one immediate fetch and then repolls on a fixed
//! interval until the selection changes or empties.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, RwLock};

use super::{FeedError, FeedState, SourceError, WaveSource};
use crate::data::WaveDataset;

/// Polls a [`WaveSource`] for the selected buoy and publishes results.
///
/// The controller is the exclusive writer of its state; the render layer
/// reads through [`subscribe`](Self::subscribe) and
/// [`current_state`](Self::current_state) only.
pub struct WaveFeedController {
    source: Arc<dyn WaveSource>,
    poll_interval: Duration,
    selected: RwLock<Option<String>>,
    epoch: Arc<AtomicU64>,
    tx: watch::Sender<FeedState<WaveDataset>>,
}

impl WaveFeedController {
    /// Create a controller with no buoy selected.
    pub fn new(source: Arc<dyn WaveSource>, poll_interval: Duration) -> Self {
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
    pub fn current_state(&self) -> FeedState<WaveDataset> {
        self.tx.borrow().clone()
    }

    /// Subscribe to state changes. Dropping the receiver unsubscribes.
    pub fn subscribe(&self) -> watch::Receiver<FeedState<WaveDataset>> {
        self.tx.subscribe()
    }

    /// Point the controller at a different buoy, or at none.
    ///
    /// Selecting the currently selected buoy is a no-op. A real change bumps
    /// the selection epoch: the superseded poll loop observes the bump at
    /// its next tick or after its in-flight fetch and exits without
    /// publishing, so a late response for the old buoy can never overwrite
    /// the new one.
    pub async fn select(&self, buoy_id: Option<&str>) {
        let mut selected = self.selected.write().await;
        if selected.as_deref() == buoy_id {
            return;
        }
        *selected = buoy_id.map(str::to_owned);

        // The bump and the idle publish happen under the watch channel's
        // lock, making them atomic against the poll loop's publish gate: a
        // completing fetch either publishes before the bump (and is then
        // overwritten by this Idle) or observes the new epoch and abandons.
        let mut epoch = 0;
        self.tx.send_if_modified(|state| {
            epoch = self.epoch.fetch_add(1, Ordering::AcqRel) + 1;
            *state = FeedState::Idle;
            true
        });

        let Some(buoy_id) = buoy_id else {
            tracing::info!("wave feed idle, polling stopped");
            return;
        };

        tracing::info!(
            buoy_id = %buoy_id,
            interval_secs = self.poll_interval.as_secs(),
            "starting wave poll loop"
        );
        tokio::spawn(poll_loop(
            self.source.clone(),
            buoy_id.to_owned(),
            epoch,
            self.epoch.clone(),
            self.poll_interval,
            self.tx.clone(),
        ));
    }
}

async fn poll_loop(
    source: Arc<dyn WaveSource>,
    buoy_id: String,
    my_epoch: u64,
    live_epoch: Arc<AtomicU64>,
    interval: Duration,
    tx: watch::Sender<FeedState<WaveDataset>>,
) {
    // First tick completes immediately, giving the immediate initial fetch.
    let mut ticker = tokio::time::interval(interval);
    loop {
        ticker.tick().await;
        if live_epoch.load(Ordering::Acquire) != my_epoch {
            return;
        }

        let outcome = source.fetch_waves(&buoy_id).await;

        // The selection may have moved on while the request was in flight.
        // First discard opportunity; the publish gate below is authoritative.
        if live_epoch.load(Ordering::Acquire) != my_epoch {
            tracing::debug!(buoy_id = %buoy_id, "discarding stale wave response");
            return;
        }

        let state = match outcome {
            Ok(dataset) => {
                tracing::debug!(
                    buoy_id = %buoy_id,
                    samples = dataset.len(),
                    "wave dataset updated"
                );
                FeedState::Ready(dataset)
            }
            Err(SourceError::Server(message)) => {
                tracing::warn!(buoy_id = %buoy_id, error = %message, "wave backend reported an error");
                FeedState::Failed(FeedError::Server(format!("Buoy Data Error: {message}")))
            }
            Err(error) => {
                tracing::error!(buoy_id = %buoy_id, error = %error, "wave fetch failed");
                FeedState::Failed(FeedError::Transport(
                    "Failed to fetch wave data - check connection".to_string(),
                ))
            }
        };

        // Epoch check and publish share the watch lock with select()'s
        // bump, so a stale result can never land over the new selection.
        let published = tx.send_if_modified(|slot| {
            if live_epoch.load(Ordering::Acquire) != my_epoch {
                return false;
            }
            *slot = state;
            true
        });
        if !published {
            tracing::debug!(buoy_id = %buoy_id, "discarding stale wave response");
            return;
        }
    }
}
