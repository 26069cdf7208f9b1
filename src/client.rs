//! Backend HTTP Client
//!
//! reqwest client for the dashboard backend's three endpoints. Implements
//! the feed source traits so the controllers never see HTTP details.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

use crate::config::BackendConfig;
use crate::data::{VideoAnalysisResult, WaveDataset};
use crate::feed::{SourceError, VideoSource, WaveSource};

/// HTTP client for the surf data backend.
pub struct BackendClient {
    client: Client,
    base_url: String,
}

/// Every endpoint answers either its success shape or `{"error": "..."}`,
/// always as a JSON body. The error variant is tried first so a payload
/// carrying an `error` field is never misread as data.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ApiPayload<T> {
    Err { error: String },
    Ok(T),
}

impl BackendClient {
    /// Create a client from configuration.
    pub fn new(config: &BackendConfig) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, SourceError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_transport)?;

        let payload: ApiPayload<T> = response
            .json()
            .await
            .map_err(|e| SourceError::Decode(e.to_string()))?;

        match payload {
            ApiPayload::Err { error } => Err(SourceError::Server(error)),
            ApiPayload::Ok(value) => Ok(value),
        }
    }
}

fn map_transport(error: reqwest::Error) -> SourceError {
    if error.is_timeout() {
        SourceError::Timeout
    } else if error.is_connect() {
        SourceError::Unavailable
    } else {
        SourceError::Request(error)
    }
}

#[async_trait]
impl WaveSource for BackendClient {
    async fn fetch_waves(&self, buoy_id: &str) -> Result<WaveDataset, SourceError> {
        let url = format!(
            "{}/api/surfdata?buoy_id={}",
            self.base_url,
            urlencoding::encode(buoy_id)
        );
        let dataset: WaveDataset = self.get_json(&url).await?;

        if !dataset.is_consistent() {
            return Err(SourceError::Decode(
                "wave dataset sequences have mismatched lengths".to_string(),
            ));
        }
        Ok(dataset)
    }
}

#[async_trait]
impl VideoSource for BackendClient {
    async fn fetch_analysis(
        &self,
        webcam_id: &str,
    ) -> Result<VideoAnalysisResult, SourceError> {
        let url = format!(
            "{}/api/video-analysis?webcam_id={}",
            self.base_url,
            urlencoding::encode(webcam_id)
        );
        self.get_json(&url).await
    }

    async fn stop_analysis(&self, webcam_id: &str) -> Result<(), SourceError> {
        let url = format!(
            "{}/api/stop-analysis/{}",
            self.base_url,
            urlencoding::encode(webcam_id)
        );
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(map_transport)?;

        // A 404 means nothing was running for this webcam; the caller only
        // ever logs teardown failures.
        if !response.status().is_success() {
            return Err(SourceError::Server(format!(
                "stop-analysis returned {}",
                response.status()
            )));
        }
        Ok(())
    }
}
