//! Surfwatch Monitor
//!
//! Headless driver for the dashboard core: selects a buoy and a webcam,
//! then logs feed updates as they are published.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use surfwatch::{config, view, BackendClient, Config, Dashboard, FeedState, LoggingConfig};

#[derive(Parser)]
#[command(name = "surfwatch", about = "Surf conditions dashboard core monitor")]
struct Cli {
    /// Path to a TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Buoy station to watch (defaults to the first catalog entry)
    #[arg(long)]
    buoy: Option<String>,

    /// Webcam to watch (defaults to none)
    #[arg(long)]
    webcam: Option<String>,

    /// Print the default configuration and exit
    #[arg(long)]
    print_default_config: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.print_default_config {
        print!("{}", config::generate_default_config());
        return Ok(());
    }

    let config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    init_tracing(&config.logging);

    tracing::info!("Surfwatch dashboard core v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Backend: {}", config.backend.base_url);

    let client = Arc::new(BackendClient::new(&config.backend)?);
    let dashboard = Dashboard::new(
        client.clone(),
        client,
        config.catalog.buoys.clone(),
        config.catalog.webcams.clone(),
        Duration::from_secs(config.feeds.wave_poll_secs),
        Duration::from_secs(config.feeds.video_poll_secs),
    );

    let buoy = match cli.buoy {
        Some(buoy) => Some(buoy),
        None => dashboard.buoys().await.first().map(|b| b.id.clone()),
    };
    dashboard.set_buoy(buoy.as_deref()).await;
    dashboard.set_webcam(cli.webcam.as_deref()).await;

    let mut waves = dashboard.subscribe_waves();
    let mut video = dashboard.subscribe_video();

    loop {
        tokio::select! {
            changed = waves.changed() => {
                if changed.is_err() {
                    break;
                }
                log_wave_state(&waves.borrow_and_update());
            }
            changed = video.changed() => {
                if changed.is_err() {
                    break;
                }
                log_video_state(&video.borrow_and_update());
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutting down...");
                break;
            }
        }
    }

    // Deselecting fires the best-effort teardown for the active webcam;
    // give the request a moment to leave before the runtime drops.
    dashboard.set_webcam(None).await;
    tokio::time::sleep(Duration::from_millis(500)).await;

    tracing::info!("Surfwatch shutdown complete");
    Ok(())
}

fn log_wave_state(state: &FeedState<surfwatch::WaveDataset>) {
    match state {
        FeedState::Idle => tracing::info!("wave feed: idle"),
        FeedState::Ready(dataset) => {
            let reading = view::latest_reading(Some(dataset));
            tracing::info!(
                samples = dataset.len(),
                wave_height = %reading.wave_height,
                peak_period = %reading.peak_period,
                direction = %reading.direction,
                average_period = %reading.average_period,
                "wave conditions"
            );
        }
        FeedState::Failed(error) => tracing::warn!("wave feed: {error}"),
    }
}

fn log_video_state(state: &FeedState<surfwatch::VideoAnalysisResult>) {
    match state {
        FeedState::Idle => tracing::info!("video feed: idle"),
        FeedState::Ready(result) => tracing::info!(
            location = %result.location_name,
            status = result.status.label(),
            surfer_count = result.surfer_count,
            "video analysis"
        ),
        FeedState::Failed(error) => tracing::warn!("video feed: {error}"),
    }
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| format!("surfwatch={}", logging.level)),
    );

    if logging.format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}
