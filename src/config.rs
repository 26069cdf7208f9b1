//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::selection::{Buoy, Webcam};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,

    #[serde(default)]
    pub feeds: FeedsConfig,

    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Backend endpoint configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_ms: u64,
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_request_timeout() -> u64 {
    10_000
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_ms: default_request_timeout(),
        }
    }
}

/// Poll cadence for the two feeds
#[derive(Debug, Clone, Deserialize)]
pub struct FeedsConfig {
    /// Wave data changes slowly; buoys report every half hour
    #[serde(default = "default_wave_poll")]
    pub wave_poll_secs: u64,

    /// Video status moves fast while the pipeline spins up
    #[serde(default = "default_video_poll")]
    pub video_poll_secs: u64,
}

fn default_wave_poll() -> u64 {
    180
}

fn default_video_poll() -> u64 {
    5
}

impl Default for FeedsConfig {
    fn default() -> Self {
        Self {
            wave_poll_secs: default_wave_poll(),
            video_poll_secs: default_video_poll(),
        }
    }
}

/// Selectable buoy stations and webcam feeds
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    #[serde(default = "default_buoys")]
    pub buoys: Vec<Buoy>,

    #[serde(default = "default_webcams")]
    pub webcams: Vec<Webcam>,
}

fn default_buoys() -> Vec<Buoy> {
    vec![
        Buoy {
            id: "273".to_string(),
            name: "Scripps Nearshore, CA".to_string(),
        },
        Buoy {
            id: "093".to_string(),
            name: "Dana Point, CA".to_string(),
        },
        Buoy {
            id: "191".to_string(),
            name: "Point Loma South, CA".to_string(),
        },
    ]
}

fn default_webcams() -> Vec<Webcam> {
    vec![
        Webcam {
            id: "Windansea".to_string(),
            name: "Windansea - La Jolla".to_string(),
            location: "La Jolla, CA".to_string(),
        },
        Webcam {
            id: "Long Beach".to_string(),
            name: "Long Beach - New York".to_string(),
            location: "Long Beach, NY".to_string(),
        },
        Webcam {
            id: "Emerald Isle".to_string(),
            name: "Emerald Isle - North Carolina".to_string(),
            location: "Bogue Banks Island, NC".to_string(),
        },
    ]
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            buoys: default_buoys(),
            webcams: default_webcams(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("surfwatch").join("config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        if let Ok(base_url) = std::env::var("SURFWATCH_BACKEND_URL") {
            self.backend.base_url = base_url;
        }
        if let Ok(timeout) = std::env::var("SURFWATCH_REQUEST_TIMEOUT_MS") {
            if let Ok(ms) = timeout.parse() {
                self.backend.request_timeout_ms = ms;
            }
        }

        if let Ok(secs) = std::env::var("SURFWATCH_WAVE_POLL_SECS") {
            if let Ok(s) = secs.parse() {
                self.feeds.wave_poll_secs = s;
            }
        }
        if let Ok(secs) = std::env::var("SURFWATCH_VIDEO_POLL_SECS") {
            if let Ok(s) = secs.parse() {
                self.feeds.video_poll_secs = s;
            }
        }

        if let Ok(level) = std::env::var("SURFWATCH_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("SURFWATCH_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Surfwatch Configuration
#
# Environment variables override these settings:
# - SURFWATCH_BACKEND_URL
# - SURFWATCH_REQUEST_TIMEOUT_MS
# - SURFWATCH_WAVE_POLL_SECS
# - SURFWATCH_VIDEO_POLL_SECS
# - SURFWATCH_LOG_LEVEL
# - SURFWATCH_LOG_FORMAT

[backend]
# Base URL of the surf data backend
base_url = "http://localhost:5000"

# Per-request timeout (ms)
request_timeout_ms = 10000

[feeds]
# How often to poll the wave dataset (seconds)
wave_poll_secs = 180

# How often to poll the video analysis (seconds)
video_poll_secs = 5

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"

# Selectable buoy stations (CDIP ids)
[[catalog.buoys]]
id = "273"
name = "Scripps Nearshore, CA"

[[catalog.buoys]]
id = "093"
name = "Dana Point, CA"

[[catalog.buoys]]
id = "191"
name = "Point Loma South, CA"

# Selectable webcam feeds
[[catalog.webcams]]
id = "Windansea"
name = "Windansea - La Jolla"
location = "La Jolla, CA"

[[catalog.webcams]]
id = "Long Beach"
name = "Long Beach - New York"
location = "Long Beach, NY"

[[catalog.webcams]]
id = "Emerald Isle"
name = "Emerald Isle - North Carolina"
location = "Bogue Banks Island, NC"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.backend.base_url, "http://localhost:5000");
        assert_eq!(config.feeds.wave_poll_secs, 180);
        assert_eq!(config.feeds.video_poll_secs, 5);
        assert_eq!(config.catalog.buoys.len(), 3);
        assert_eq!(config.catalog.webcams.len(), 3);
    }

    #[test]
    fn test_generated_default_config_parses() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.feeds.wave_poll_secs, 180);
        assert_eq!(config.catalog.webcams[1].id, "Long Beach");
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_partial_file_fills_in_defaults() {
        let config: Config = toml::from_str("[feeds]\nvideo_poll_secs = 2\n").unwrap();
        assert_eq!(config.feeds.video_poll_secs, 2);
        assert_eq!(config.feeds.wave_poll_secs, 180);
        assert_eq!(config.backend.base_url, "http://localhost:5000");
    }
}
