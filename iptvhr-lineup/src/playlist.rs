//! M3U playlist parsing.
//!
//! The parser makes a single forward pass over the lines of the playlist.
//! An `#EXTINF:` line opens a pending channel, and the next line starting
//! with `http` completes it. Everything else is skipped:
//!
//! ```text
//! #EXTM3U                          <- ignored
//! #EXTINF:-1 tvg-id="x",News 24    <- pending "News 24"
//! http://example.com/news.m3u8     <- completes channel 1
//! http://example.com/orphan.m3u8   <- no pending channel, ignored
//! ```

use log::{debug, trace};

use crate::types::Channel;

/// Metadata line marker.
pub(crate) const EXTINF_PREFIX: &str = "#EXTINF:";

/// Prefix a line must carry to be taken as a stream URL.
pub(crate) const URL_PREFIX: &str = "http";

/// Parse playlist text into channels, in discovery order.
///
/// Malformed input never fails; it only yields fewer channels.
pub fn parse_playlist(content: &str) -> Vec<Channel> {
    let mut channels: Vec<Channel> = Vec::new();
    let mut pending: Option<String> = None;

    for line in content.lines() {
        let line = line.trim();

        if line.starts_with(EXTINF_PREFIX) {
            let name = extract_name(line)
                .map(str::to_string)
                .unwrap_or_else(|| format!("Channel {}", channels.len() + 1));
            if let Some(dropped) = pending.replace(name) {
                trace!("Dropping channel without URL: {}", dropped);
            }
        } else if line.starts_with(URL_PREFIX) {
            match pending.take() {
                Some(name) => {
                    let index = channels.len() + 1;
                    channels.push(Channel::new(name, line, index));
                }
                None => trace!("Ignoring URL without #EXTINF: {}", line),
            }
        }
    }

    if let Some(dropped) = pending {
        trace!("Dropping trailing channel without URL: {}", dropped);
    }

    debug!("Parsed {} channels from playlist", channels.len());
    channels
}

/// Text after the last comma of a metadata line, if non-empty.
fn extract_name(line: &str) -> Option<&str> {
    let pos = line.rfind(',')?;
    let name = &line[pos + 1..];
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}
