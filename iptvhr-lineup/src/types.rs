//! Channel records and the documents served to tuner clients.

use serde::{Serialize, Serializer};

/// Display name marking a source that has no physical antenna.
///
/// Tuner clients refuse a lineup status without a source, so a fixed value
/// is reported.
pub(crate) const SOURCE_NAME: &str = "Antenna";

/// A channel parsed out of a playlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    /// Display name, either from the `#EXTINF:` line or synthesized.
    pub name: String,
    /// Playback location, taken verbatim from the playlist.
    pub url: String,
    /// 1-based discovery order within the source playlist.
    pub sequence_index: usize,
}

impl Channel {
    /// Create a channel record.
    pub fn new(name: impl Into<String>, url: impl Into<String>, sequence_index: usize) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            sequence_index,
        }
    }
}

/// Static identity reported in the device descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceIdentity {
    pub friendly_name: String,
    pub manufacturer: String,
    pub model_number: String,
    pub firmware_name: String,
    pub firmware_version: String,
    pub device_id: String,
    pub device_auth: String,
    pub tuner_count: u32,
}

impl Default for DeviceIdentity {
    fn default() -> Self {
        Self {
            friendly_name: "IPTV Tuner".to_string(),
            manufacturer: "Silicondust".to_string(),
            model_number: "HDTC-2US".to_string(),
            firmware_name: "hdhomerun_cablecard".to_string(),
            firmware_version: "20200101".to_string(),
            device_id: "12345678".to_string(),
            device_auth: "test1234".to_string(),
            tuner_count: 2,
        }
    }
}

/// Where this service is reachable by clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceLocation {
    pub base_url: String,
    pub lineup_url: String,
}

impl ServiceLocation {
    /// Build a location whose lineup URL is `<base_url>/lineup.json`.
    pub fn new(base_url: &str) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        let lineup_url = format!("{}/lineup.json", base_url);
        Self {
            base_url,
            lineup_url,
        }
    }

    /// Override the derived lineup URL.
    pub fn with_lineup_url(mut self, lineup_url: impl Into<String>) -> Self {
        self.lineup_url = lineup_url.into();
        self
    }
}

/// Device discovery document (`discover.json`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeviceDescriptor {
    pub friendly_name: String,
    pub manufacturer: String,
    pub model_number: String,
    pub firmware_name: String,
    pub firmware_version: String,
    #[serde(rename = "DeviceID")]
    pub device_id: String,
    pub device_auth: String,
    pub tuner_count: u32,
    #[serde(rename = "BaseURL")]
    pub base_url: String,
    #[serde(rename = "LineupURL")]
    pub lineup_url: String,
}

/// One entry of the channel lineup (`lineup.json`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct LineupEntry {
    pub guide_number: String,
    pub guide_name: String,
    #[serde(rename = "URL")]
    pub url: String,
    #[serde(rename = "HD", serialize_with = "flag")]
    pub hd: bool,
}

/// Scan status document (`lineup_status.json`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct LineupStatus {
    #[serde(serialize_with = "flag")]
    pub scan_in_progress: bool,
    #[serde(serialize_with = "flag")]
    pub scan_possible: bool,
    pub source: String,
    pub source_list: Vec<String>,
}

impl Default for LineupStatus {
    fn default() -> Self {
        Self {
            scan_in_progress: false,
            scan_possible: true,
            source: SOURCE_NAME.to_string(),
            source_list: vec![SOURCE_NAME.to_string()],
        }
    }
}

/// Tuner clients expect 0/1 rather than JSON booleans.
fn flag<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u8(u8::from(*value))
}
