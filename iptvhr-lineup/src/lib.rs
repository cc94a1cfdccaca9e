//! Translate an IPTV M3U playlist into an HDHomeRun-style channel lineup.
//!
//! The crate is the core of a network tuner emulator: it fetches a playlist,
//! parses the `#EXTINF:`/URL pairs into [`Channel`] records, keeps them in a
//! [`ChannelStore`] and derives the three discovery documents with
//! [`ViewBuilder`].
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use iptvhr_lineup::{parse_playlist, ChannelStore, DeviceIdentity, ServiceLocation, ViewBuilder};
//!
//! let store = Arc::new(ChannelStore::new());
//! store.replace(parse_playlist("#EXTINF:-1,News 24\nhttp://example.com/news.m3u8\n"));
//!
//! let views = ViewBuilder::new(
//!     Arc::clone(&store),
//!     DeviceIdentity::default(),
//!     ServiceLocation::new("http://192.168.1.10:6077"),
//! );
//! let lineup = views.lineup();
//! assert_eq!(lineup[0].guide_number, "1");
//! assert_eq!(lineup[0].guide_name, "News 24");
//! ```

pub mod error;
pub mod fetcher;
pub mod playlist;
pub mod store;
pub mod types;
pub mod view;

pub use error::FetchError;
pub use fetcher::{PlaylistFetcher, PlaylistSource};
pub use playlist::parse_playlist;
pub use store::ChannelStore;
pub use types::{Channel, DeviceDescriptor, DeviceIdentity, LineupEntry, LineupStatus, ServiceLocation};
pub use view::ViewBuilder;

/// Fetch the playlist, parse it and replace the store contents.
///
/// Returns the number of channels stored. On failure the store keeps
/// whatever it held before.
pub async fn load_channels(fetcher: &PlaylistFetcher, store: &ChannelStore) -> error::Result<usize> {
    let (text, origin) = fetcher.fetch_with_origin().await?;
    let channels = parse_playlist(&text);
    let count = channels.len();
    store.replace(channels);
    log::info!("Loaded {} channels from {}", count, origin);
    Ok(count)
}
