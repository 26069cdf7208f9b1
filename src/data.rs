//! Feed Data Model
//!
//! Wire-level types for the two remote feeds: buoy wave datasets and
//! video analysis summaries. Field names mirror the backend JSON.

use serde::{Deserialize, Serialize};

/// One poll's worth of buoy measurements.
///
/// Parallel vectors indexed by sample position; index 0 is the oldest
/// sample, the last index the most recent. Replaced wholesale on every
/// successful poll, never merged incrementally.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct WaveDataset {
    /// Sample timestamps, "%Y-%m-%d %I:%M %p" as the backend formats them
    pub time: Vec<String>,
    /// Significant wave height (m)
    #[serde(rename = "waveHs")]
    pub wave_hs: Vec<f64>,
    /// Peak period (s)
    #[serde(rename = "waveTp")]
    pub wave_tp: Vec<f64>,
    /// Peak direction (degrees)
    #[serde(rename = "waveDp")]
    pub wave_dp: Vec<f64>,
    /// Average period (s)
    #[serde(rename = "waveTa")]
    pub wave_ta: Vec<f64>,
    /// Mean zero-upcrossing period (s)
    #[serde(rename = "waveTz")]
    pub wave_tz: Vec<f64>,
    /// Peak power spectral density (m^2/Hz)
    #[serde(rename = "wavePeakPSD")]
    pub wave_peak_psd: Vec<f64>,
}

impl WaveDataset {
    /// Number of samples in the dataset.
    pub fn len(&self) -> usize {
        self.time.len()
    }

    /// Whether the dataset holds no samples at all.
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// All parallel vectors must have identical length; a payload that
    /// violates this is treated as malformed rather than partially applied.
    pub fn is_consistent(&self) -> bool {
        let n = self.time.len();
        self.wave_hs.len() == n
            && self.wave_tp.len() == n
            && self.wave_dp.len() == n
            && self.wave_ta.len() == n
            && self.wave_tz.len() == n
            && self.wave_peak_psd.len() == n
    }
}

/// Analysis phase reported by the video pipeline.
///
/// Assigned upstream, never inferred here. This enum is the source of
/// truth for any branching; [`VideoStatus::label`] is display convenience
/// only. The backend emits both capitalized and lowercase spellings
/// depending on pipeline phase, hence the aliases. The analyzer also
/// reports tool-specific failure statuses (`ffmpeg_error`,
/// `roboflow_error`); anything unrecognized is a pipeline error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoStatus {
    #[serde(alias = "Starting")]
    Starting,
    #[serde(alias = "Initializing")]
    Initializing,
    #[serde(alias = "Online")]
    Online,
    #[serde(other)]
    Error,
}

impl VideoStatus {
    /// Human-readable status label shown next to the live view.
    pub fn label(&self) -> &'static str {
        match self {
            VideoStatus::Starting => "Starting Analysis...",
            VideoStatus::Initializing => "Initializing Analysis...",
            VideoStatus::Online => "Live",
            VideoStatus::Error => "Analysis Error",
        }
    }

    /// True while the pipeline is still spinning up; the render layer shows
    /// its "setting up analysis" view for these phases.
    pub fn is_setting_up(&self) -> bool {
        matches!(self, VideoStatus::Starting | VideoStatus::Initializing)
    }
}

/// Latest summarized output of the video analysis pipeline for one webcam.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct VideoAnalysisResult {
    pub status: VideoStatus,
    pub surfer_count: u32,
    pub location_name: String,
    /// Absent while the pipeline is starting or initializing.
    #[serde(default)]
    pub last_update: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wave_dataset_decodes_backend_field_names() {
        let dataset: WaveDataset = serde_json::from_value(serde_json::json!({
            "time": ["2025-01-04 01:00 PM", "2025-01-04 01:30 PM"],
            "waveHs": [1.05, 2.34],
            "waveTp": [8.0, 9.0],
            "waveDp": [180.0, 190.0],
            "waveTa": [6.0, 7.0],
            "waveTz": [5.0, 5.5],
            "wavePeakPSD": [0.4, 0.6],
        }))
        .unwrap();

        assert_eq!(dataset.len(), 2);
        assert!(dataset.is_consistent());
        assert_eq!(dataset.wave_peak_psd, vec![0.4, 0.6]);
    }

    #[test]
    fn test_mismatched_lengths_are_inconsistent() {
        let dataset = WaveDataset {
            time: vec!["2025-01-04 01:00 PM".to_string()],
            wave_hs: vec![1.0, 2.0],
            wave_tp: vec![8.0],
            wave_dp: vec![180.0],
            wave_ta: vec![6.0],
            wave_tz: vec![5.0],
            wave_peak_psd: vec![0.4],
        };
        assert!(!dataset.is_consistent());
    }

    #[test]
    fn test_video_status_accepts_both_spellings() {
        let lower: VideoStatus = serde_json::from_str("\"starting\"").unwrap();
        let upper: VideoStatus = serde_json::from_str("\"Starting\"").unwrap();
        assert_eq!(lower, VideoStatus::Starting);
        assert_eq!(upper, VideoStatus::Starting);
    }

    #[test]
    fn test_video_result_without_last_update() {
        let result: VideoAnalysisResult = serde_json::from_value(serde_json::json!({
            "webcam_id": "Windansea",
            "location_name": "Windansea - La Jolla",
            "surfer_count": 0,
            "status": "Initializing",
        }))
        .unwrap();

        assert_eq!(result.status, VideoStatus::Initializing);
        assert!(result.last_update.is_none());
        assert!(result.status.is_setting_up());
    }

    #[test]
    fn test_analyzer_failure_statuses_map_to_error() {
        // The analyzer reports tool-specific failures verbatim; they must
        // classify as Error rather than fail the whole decode.
        for raw in ["\"ffmpeg_error\"", "\"roboflow_error\"", "\"Error\"", "\"error\""] {
            let status: VideoStatus = serde_json::from_str(raw).unwrap();
            assert_eq!(status, VideoStatus::Error, "{raw}");
        }
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(VideoStatus::Online.label(), "Live");
        assert_eq!(VideoStatus::Error.label(), "Analysis Error");
        assert!(!VideoStatus::Online.is_setting_up());
    }
}
