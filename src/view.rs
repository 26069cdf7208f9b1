//! View Model Builder
//!
//! Pure transforms from a wave dataset to presentation-ready values. No
//! state, no caching; the render layer recomputes these on every dataset
//! change.

use chrono::NaiveDateTime;

use crate::data::WaveDataset;

/// Shown for any reading that is absent or unformattable.
pub const PLACEHOLDER: &str = "--";

/// Latest-reading snapshot for the current-conditions panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentConditions {
    pub wave_height: String,
    pub peak_period: String,
    pub direction: String,
    pub average_period: String,
}

/// One chart entry, oldest first, matching the dataset's index order.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    /// Local 12-hour clock label for the x-axis.
    pub time: String,
    pub wave_height: f64,
    pub peak_period: f64,
}

/// Snapshot of the most recent sample, formatted for display.
///
/// Heights and periods get one decimal, direction zero. Every field falls
/// back to [`PLACEHOLDER`] when the dataset is absent or empty, or when its
/// own sequence is missing the latest index; nothing here can panic.
pub fn latest_reading(dataset: Option<&WaveDataset>) -> CurrentConditions {
    let Some(data) = dataset.filter(|d| !d.wave_hs.is_empty()) else {
        return CurrentConditions {
            wave_height: PLACEHOLDER.to_string(),
            peak_period: PLACEHOLDER.to_string(),
            direction: PLACEHOLDER.to_string(),
            average_period: PLACEHOLDER.to_string(),
        };
    };

    let latest = data.wave_hs.len() - 1;
    CurrentConditions {
        wave_height: format_reading(data.wave_hs.get(latest), 1),
        peak_period: format_reading(data.wave_tp.get(latest), 1),
        direction: format_reading(data.wave_dp.get(latest), 0),
        average_period: format_reading(data.wave_ta.get(latest), 1),
    }
}

fn format_reading(value: Option<&f64>, decimals: usize) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{v:.decimals$}"),
        _ => PLACEHOLDER.to_string(),
    }
}

/// Chart points for the wave-height/peak-period chart, one per sample,
/// oldest first.
pub fn chart_points(dataset: &WaveDataset) -> Vec<ChartPoint> {
    dataset
        .time
        .iter()
        .enumerate()
        .map(|(index, raw_time)| ChartPoint {
            time: clock_label(raw_time),
            wave_height: dataset.wave_hs.get(index).copied().unwrap_or(f64::NAN),
            peak_period: dataset.wave_tp.get(index).copied().unwrap_or(f64::NAN),
        })
        .collect()
}

/// Reformat a backend timestamp ("%Y-%m-%d %I:%M %p") to a short 12-hour
/// clock label. Unparseable strings fall back to whatever follows the first
/// space, or the raw string.
fn clock_label(raw: &str) -> String {
    if let Ok(timestamp) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %I:%M %p") {
        return timestamp.format("%-I:%M %p").to_string();
    }
    raw.split_once(' ')
        .map(|(_, rest)| rest.to_string())
        .unwrap_or_else(|| raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> WaveDataset {
        WaveDataset {
            time: vec![
                "2025-01-04 01:00 PM".to_string(),
                "2025-01-04 01:30 PM".to_string(),
            ],
            wave_hs: vec![1.05, 2.34],
            wave_tp: vec![8.0, 9.0],
            wave_dp: vec![180.0, 190.0],
            wave_ta: vec![6.0, 7.0],
            wave_tz: vec![5.0, 5.5],
            wave_peak_psd: vec![0.4, 0.6],
        }
    }

    #[test]
    fn test_latest_reading_formats_most_recent_sample() {
        let reading = latest_reading(Some(&dataset()));
        assert_eq!(reading.wave_height, "2.3");
        assert_eq!(reading.peak_period, "9.0");
        assert_eq!(reading.direction, "190");
        assert_eq!(reading.average_period, "7.0");
    }

    #[test]
    fn test_latest_reading_absent_dataset_is_all_placeholders() {
        let reading = latest_reading(None);
        assert_eq!(reading.wave_height, PLACEHOLDER);
        assert_eq!(reading.peak_period, PLACEHOLDER);
        assert_eq!(reading.direction, PLACEHOLDER);
        assert_eq!(reading.average_period, PLACEHOLDER);
    }

    #[test]
    fn test_latest_reading_empty_dataset_is_all_placeholders() {
        let mut data = dataset();
        data.time.clear();
        data.wave_hs.clear();
        data.wave_tp.clear();
        data.wave_dp.clear();
        data.wave_ta.clear();
        let reading = latest_reading(Some(&data));
        assert_eq!(reading.wave_height, PLACEHOLDER);
        assert_eq!(reading.average_period, PLACEHOLDER);
    }

    #[test]
    fn test_missing_component_falls_back_without_panicking() {
        let mut data = dataset();
        data.wave_tp.truncate(1);
        let reading = latest_reading(Some(&data));
        assert_eq!(reading.wave_height, "2.3");
        assert_eq!(reading.peak_period, PLACEHOLDER);
    }

    #[test]
    fn test_non_finite_readings_are_placeholders() {
        let mut data = dataset();
        data.wave_dp[1] = f64::NAN;
        let reading = latest_reading(Some(&data));
        assert_eq!(reading.direction, PLACEHOLDER);
        assert_eq!(reading.wave_height, "2.3");
    }

    #[test]
    fn test_chart_points_preserve_length_and_order() {
        let points = chart_points(&dataset());
        assert_eq!(points.len(), 2);
        // Oldest sample first, same index order as the dataset.
        assert_eq!(points[0].wave_height, 1.05);
        assert_eq!(points[1].wave_height, 2.34);
        assert_eq!(points[1].peak_period, 9.0);
    }

    #[test]
    fn test_chart_time_is_twelve_hour_clock() {
        let points = chart_points(&dataset());
        assert_eq!(points[0].time, "1:00 PM");
        assert_eq!(points[1].time, "1:30 PM");
    }

    #[test]
    fn test_chart_time_falls_back_on_unparseable_input() {
        let mut data = dataset();
        data.time[0] = "2025-01-04T13:00:00 13:00".to_string();
        data.time[1] = "garbage".to_string();
        let points = chart_points(&data);
        assert_eq!(points[0].time, "13:00");
        assert_eq!(points[1].time, "garbage");
    }

    #[test]
    fn test_empty_dataset_yields_no_points() {
        let mut data = dataset();
        data.time.clear();
        assert!(chart_points(&data).is_empty());
    }
}
