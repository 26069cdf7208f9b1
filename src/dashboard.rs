//! Dashboard Core
//!
//! Ties the selection store to the two feed controllers. This is the only
//! write surface exposed to callers: the render layer reads feed states and
//! view models, and mutates nothing except through
//! [`set_buoy`](Dashboard::set_buoy) / [`set_webcam`](Dashboard::set_webcam).

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, RwLock};

use crate::data::{VideoAnalysisResult, WaveDataset};
use crate::feed::{
    FeedState, VideoFeedController, VideoSource, WaveFeedController, WaveSource,
};
use crate::selection::{Buoy, Selection, SelectionChange, SelectionStore, Webcam};

/// The dashboard core: one selection store, two feed controllers.
pub struct Dashboard {
    store: RwLock<SelectionStore>,
    wave: WaveFeedController,
    video: VideoFeedController,
}

impl Dashboard {
    /// Assemble the core from its sources, catalogs, and poll cadences.
    pub fn new(
        wave_source: Arc<dyn WaveSource>,
        video_source: Arc<dyn VideoSource>,
        buoys: Vec<Buoy>,
        webcams: Vec<Webcam>,
        wave_interval: Duration,
        video_interval: Duration,
    ) -> Self {
        Self {
            store: RwLock::new(SelectionStore::new(buoys, webcams)),
            wave: WaveFeedController::new(wave_source, wave_interval),
            video: VideoFeedController::new(video_source, video_interval),
        }
    }

    /// Change the selected buoy. No-op when unchanged; otherwise the wave
    /// controller is retargeted (or idled for `None`).
    pub async fn set_buoy(&self, buoy_id: Option<&str>) {
        let mut store = self.store.write().await;
        if store.set_buoy(buoy_id) == SelectionChange::Unchanged {
            return;
        }
        self.wave.select(buoy_id).await;
    }

    /// Change the selected webcam. No-op when unchanged; otherwise the
    /// video controller is retargeted, tearing down the previous webcam's
    /// analysis on the way.
    pub async fn set_webcam(&self, webcam_id: Option<&str>) {
        let mut store = self.store.write().await;
        if store.set_webcam(webcam_id) == SelectionChange::Unchanged {
            return;
        }
        self.video.select(webcam_id).await;
    }

    /// The current identifier pair.
    pub async fn selection(&self) -> Selection {
        self.store.read().await.current()
    }

    /// Available buoy stations.
    pub async fn buoys(&self) -> Vec<Buoy> {
        self.store.read().await.buoys().to_vec()
    }

    /// Available webcam feeds.
    pub async fn webcams(&self) -> Vec<Webcam> {
        self.store.read().await.webcams().to_vec()
    }

    /// Latest published wave feed state.
    pub fn wave_state(&self) -> FeedState<WaveDataset> {
        self.wave.current_state()
    }

    /// Subscribe to wave feed state changes.
    pub fn subscribe_waves(&self) -> watch::Receiver<FeedState<WaveDataset>> {
        self.wave.subscribe()
    }

    /// Latest published video feed state.
    pub fn video_state(&self) -> FeedState<VideoAnalysisResult> {
        self.video.current_state()
    }

    /// Subscribe to video feed state changes.
    pub fn subscribe_video(&self) -> watch::Receiver<FeedState<VideoAnalysisResult>> {
        self.video.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::VideoStatus;
    use crate::feed::SourceError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct FakeBackend {
        wave_fetches: AtomicUsize,
        stops: Mutex<Vec<String>>,
    }

    impl FakeBackend {
        fn new() -> Self {
            Self {
                wave_fetches: AtomicUsize::new(0),
                stops: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl WaveSource for FakeBackend {
        async fn fetch_waves(&self, _buoy_id: &str) -> Result<WaveDataset, SourceError> {
            self.wave_fetches.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(50)).await;
            Ok(WaveDataset {
                time: vec!["2025-01-04 01:00 PM".to_string()],
                wave_hs: vec![1.0],
                wave_tp: vec![8.0],
                wave_dp: vec![180.0],
                wave_ta: vec![6.0],
                wave_tz: vec![5.0],
                wave_peak_psd: vec![0.4],
            })
        }
    }

    #[async_trait]
    impl VideoSource for FakeBackend {
        async fn fetch_analysis(
            &self,
            webcam_id: &str,
        ) -> Result<VideoAnalysisResult, SourceError> {
            tokio::time::sleep(Duration::from_millis(50)).await;
            Ok(VideoAnalysisResult {
                status: VideoStatus::Online,
                surfer_count: 2,
                location_name: webcam_id.to_string(),
                last_update: None,
            })
        }

        async fn stop_analysis(&self, webcam_id: &str) -> Result<(), SourceError> {
            self.stops.lock().unwrap().push(webcam_id.to_string());
            Ok(())
        }
    }

    fn dashboard(backend: Arc<FakeBackend>) -> Dashboard {
        Dashboard::new(
            backend.clone(),
            backend,
            vec![Buoy {
                id: "273".to_string(),
                name: "Scripps Nearshore, CA".to_string(),
            }],
            vec![Webcam {
                id: "Windansea".to_string(),
                name: "Windansea - La Jolla".to_string(),
                location: "La Jolla, CA".to_string(),
            }],
            Duration::from_secs(180),
            Duration::from_secs(5),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_selection_edits_drive_both_feeds() {
        let backend = Arc::new(FakeBackend::new());
        let dash = dashboard(backend.clone());

        dash.set_buoy(Some("273")).await;
        dash.set_webcam(Some("Windansea")).await;
        tokio::time::sleep(Duration::from_secs(1)).await;

        assert!(dash.wave_state().data().is_some());
        assert!(dash.video_state().data().is_some());
        let selection = dash.selection().await;
        assert_eq!(selection.buoy_id.as_deref(), Some("273"));
        assert_eq!(selection.webcam_id.as_deref(), Some("Windansea"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_repeated_set_does_not_restart_controllers() {
        let backend = Arc::new(FakeBackend::new());
        let dash = dashboard(backend.clone());

        dash.set_buoy(Some("273")).await;
        tokio::time::sleep(Duration::from_secs(1)).await;
        dash.set_buoy(Some("273")).await;
        dash.set_webcam(Some("Windansea")).await;
        dash.set_webcam(Some("Windansea")).await;
        tokio::time::sleep(Duration::from_secs(1)).await;

        assert_eq!(backend.wave_fetches.load(Ordering::SeqCst), 1);
        assert!(backend.stops.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_webcam_switch_tears_down_previous() {
        let backend = Arc::new(FakeBackend::new());
        let dash = dashboard(backend.clone());

        dash.set_webcam(Some("Windansea")).await;
        tokio::time::sleep(Duration::from_secs(1)).await;
        dash.set_webcam(Some("Long Beach")).await;
        tokio::time::sleep(Duration::from_secs(1)).await;

        assert_eq!(
            backend.stops.lock().unwrap().clone(),
            vec!["Windansea".to_string()]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_catalogs_come_from_construction() {
        let backend = Arc::new(FakeBackend::new());
        let dash = dashboard(backend);
        assert_eq!(dash.buoys().await.len(), 1);
        assert_eq!(dash.webcams().await[0].id, "Windansea");
    }
}
