//! iptvhr-proxy: HDHomeRun-compatible tuner for IPTV playlists.
//!
//! The playlist is loaded once at startup, then the discovery, lineup and
//! lineup status documents are served over HTTP so media servers can add
//! the playlist as a network tuner.

use std::sync::Arc;

use clap::Parser;
use log::{error, info, warn};

use iptvhr_lineup::{load_channels, ChannelStore, PlaylistFetcher, ViewBuilder};

mod config;
mod logging;
mod web;

use config::{Args, ConfigFile, Settings};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load config file: explicit path > auto-detect > default
    let file_config = match config::config_path(&args) {
        Some(path) => match config::load_config(&path) {
            Ok(c) => {
                eprintln!("Loaded config from: {}", path.display());
                c
            }
            Err(e) => {
                eprintln!("{}", e);
                return Err(e.into());
            }
        },
        None => ConfigFile::default(),
    };

    let settings = Settings::resolve(args, file_config)?;

    logging::init_logging(
        &settings.log_dir,
        settings.log_retention_days,
        settings.verbose,
        settings.log_level.as_deref(),
    )?;

    info!("iptvhr-proxy starting...");
    info!("  Listen address: {}", settings.listen);
    info!("  Playlist: {}", settings.playlist);
    if let Some(fallback) = &settings.fallback_file {
        info!("  Fallback playlist: {:?}", fallback);
    }
    info!("  Base URL: {}", settings.location.base_url);
    info!("  Lineup URL: {}", settings.location.lineup_url);
    if settings.base_url_is_unroutable() {
        warn!("Base URL uses a wildcard address; set --base-url so clients can reach this tuner");
    }

    let mut fetcher = PlaylistFetcher::new(settings.playlist.clone(), settings.timeout)?;
    if let Some(fallback) = &settings.fallback_file {
        fetcher = fetcher.with_fallback(fallback);
    }

    // Finish the first load before serving so no request sees a half-started device.
    let store = Arc::new(ChannelStore::new());
    match load_channels(&fetcher, &store).await {
        Ok(count) => info!("Channel lineup ready: {} channels", count),
        Err(e) => warn!("Failed to load playlist, serving an empty lineup: {}", e),
    }

    let views = ViewBuilder::new(Arc::clone(&store), settings.identity.clone(), settings.location.clone());

    if let Err(e) = web::start_web_server(settings.listen, views).await {
        error!("Tuner API error: {}", e);
        return Err(e);
    }

    Ok(())
}
