//! Command line and configuration file handling.
//!
//! Values are resolved in this order: command line, configuration file,
//! built-in defaults.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use serde::Deserialize;
use thiserror::Error;

use iptvhr_lineup::{DeviceIdentity, PlaylistSource, ServiceLocation};

/// Configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "iptvhr-proxy.toml";

const DEFAULT_LISTEN: &str = "0.0.0.0:6077";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_LOG_DIR: &str = "logs";
const DEFAULT_RETENTION_DAYS: u64 = 7;

/// iptvhr-proxy - HDHomeRun-compatible tuner for IPTV playlists
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Address to listen on
    #[arg(short, long)]
    pub listen: Option<SocketAddr>,

    /// Playlist URL or local file path
    #[arg(short, long)]
    pub playlist: Option<String>,

    /// Local playlist read when the primary source fails
    #[arg(long)]
    pub fallback_file: Option<PathBuf>,

    /// Base URL advertised to clients (default: http://<listen>)
    #[arg(short, long)]
    pub base_url: Option<String>,

    /// Lineup URL advertised to clients (default: <base-url>/lineup.json)
    #[arg(long)]
    pub lineup_url: Option<String>,

    /// Playlist request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Configuration file path
    #[arg(short = 'f', long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Directory where log files are stored
    #[arg(long)]
    pub log_dir: Option<PathBuf>,

    /// Number of days to keep log files
    #[arg(long)]
    pub log_retention_days: Option<u64>,
}

/// Configuration file format.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub playlist: PlaylistSection,
    #[serde(default)]
    pub device: DeviceSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

#[derive(Debug, Deserialize, Default)]
pub struct ServerSection {
    pub listen: Option<String>,
    pub base_url: Option<String>,
    pub lineup_url: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct PlaylistSection {
    pub url: Option<String>,
    pub fallback_file: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize, Default)]
pub struct DeviceSection {
    pub friendly_name: Option<String>,
    pub manufacturer: Option<String>,
    pub model_number: Option<String>,
    pub firmware_name: Option<String>,
    pub firmware_version: Option<String>,
    pub device_id: Option<String>,
    pub device_auth: Option<String>,
    pub tuner_count: Option<u32>,
}

#[derive(Debug, Deserialize, Default)]
pub struct LoggingSection {
    pub log_dir: Option<String>,
    pub retention_days: Option<u64>,
    pub level: Option<String>,
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid listen address {0:?}")]
    InvalidListen(String),

    #[error("No playlist configured (use --playlist or [playlist] url)")]
    MissingPlaylist,
}

/// Fully resolved runtime settings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub listen: SocketAddr,
    pub playlist: PlaylistSource,
    pub fallback_file: Option<PathBuf>,
    pub timeout: Duration,
    pub location: ServiceLocation,
    pub identity: DeviceIdentity,
    pub log_dir: PathBuf,
    pub log_retention_days: u64,
    pub log_level: Option<String>,
    pub verbose: bool,
}

/// Load a TOML configuration file.
pub fn load_config(path: &Path) -> Result<ConfigFile, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Config file to use: explicit path, else the default file if present.
pub fn config_path(args: &Args) -> Option<PathBuf> {
    args.config.clone().or_else(|| {
        let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
        if default_path.exists() {
            Some(default_path)
        } else {
            None
        }
    })
}

/// Treat anything that is not an http(s) URL as a file path.
pub fn playlist_source(value: &str) -> PlaylistSource {
    if has_scheme(value, "http://") || has_scheme(value, "https://") {
        PlaylistSource::Url(value.to_string())
    } else {
        PlaylistSource::File(PathBuf::from(value))
    }
}

/// Case-insensitive prefix match for URL schemes.
fn has_scheme(value: &str, scheme: &str) -> bool {
    value
        .get(..scheme.len())
        .map(|prefix| prefix.eq_ignore_ascii_case(scheme))
        .unwrap_or(false)
}

impl Settings {
    /// Merge command line arguments over the configuration file.
    pub fn resolve(args: Args, file: ConfigFile) -> Result<Self, ConfigError> {
        let listen = match args.listen {
            Some(addr) => addr,
            None => {
                let raw = file.server.listen.as_deref().unwrap_or(DEFAULT_LISTEN);
                raw.parse::<SocketAddr>()
                    .map_err(|_| ConfigError::InvalidListen(raw.to_string()))?
            }
        };

        let playlist = args
            .playlist
            .or(file.playlist.url)
            .map(|p| playlist_source(&p))
            .ok_or(ConfigError::MissingPlaylist)?;

        let fallback_file = args
            .fallback_file
            .or_else(|| file.playlist.fallback_file.map(PathBuf::from));

        let timeout = Duration::from_secs(
            args.timeout
                .or(file.playlist.timeout_secs)
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        );

        let base_url = args
            .base_url
            .or(file.server.base_url)
            .unwrap_or_else(|| format!("http://{}", listen));
        let mut location = ServiceLocation::new(&base_url);
        if let Some(lineup_url) = args.lineup_url.or(file.server.lineup_url) {
            location = location.with_lineup_url(lineup_url);
        }

        let defaults = DeviceIdentity::default();
        let device = file.device;
        let identity = DeviceIdentity {
            friendly_name: device.friendly_name.unwrap_or(defaults.friendly_name),
            manufacturer: device.manufacturer.unwrap_or(defaults.manufacturer),
            model_number: device.model_number.unwrap_or(defaults.model_number),
            firmware_name: device.firmware_name.unwrap_or(defaults.firmware_name),
            firmware_version: device.firmware_version.unwrap_or(defaults.firmware_version),
            device_id: device.device_id.unwrap_or(defaults.device_id),
            device_auth: device.device_auth.unwrap_or(defaults.device_auth),
            tuner_count: device.tuner_count.unwrap_or(defaults.tuner_count),
        };

        let log_dir = args.log_dir.unwrap_or_else(|| {
            PathBuf::from(file.logging.log_dir.as_deref().unwrap_or(DEFAULT_LOG_DIR))
        });
        let log_retention_days = args
            .log_retention_days
            .or(file.logging.retention_days)
            .unwrap_or(DEFAULT_RETENTION_DAYS);

        Ok(Self {
            listen,
            playlist,
            fallback_file,
            timeout,
            location,
            identity,
            log_dir,
            log_retention_days,
            log_level: file.logging.level,
            verbose: args.verbose,
        })
    }

    /// Whether the advertised base URL was derived from a wildcard address.
    pub fn base_url_is_unroutable(&self) -> bool {
        self.listen.ip().is_unspecified() && self.location.base_url == format!("http://{}", self.listen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn args_with_playlist(playlist: &str) -> Args {
        Args {
            playlist: Some(playlist.to_string()),
            ..Args::default()
        }
    }

    #[test]
    fn test_defaults() {
        let settings =
            Settings::resolve(args_with_playlist("http://example.com/list.m3u"), ConfigFile::default()).unwrap();

        assert_eq!(settings.listen, "0.0.0.0:6077".parse::<SocketAddr>().unwrap());
        assert_eq!(settings.playlist, PlaylistSource::Url("http://example.com/list.m3u".to_string()));
        assert_eq!(settings.timeout, Duration::from_secs(10));
        assert_eq!(settings.location.base_url, "http://0.0.0.0:6077");
        assert_eq!(settings.location.lineup_url, "http://0.0.0.0:6077/lineup.json");
        assert_eq!(settings.identity, DeviceIdentity::default());
        assert_eq!(settings.log_dir, PathBuf::from("logs"));
        assert_eq!(settings.log_retention_days, 7);
        assert!(settings.base_url_is_unroutable());
    }

    #[test]
    fn test_missing_playlist_is_error() {
        let err = Settings::resolve(Args::default(), ConfigFile::default()).unwrap_err();
        assert!(matches!(err, ConfigError::MissingPlaylist));
    }

    #[test]
    fn test_file_values_used() {
        let file: ConfigFile = toml::from_str(
            r#"
            [server]
            listen = "127.0.0.1:5004"
            base_url = "http://tuner.lan:5004/"

            [playlist]
            url = "/srv/iptv/playlist.m3u"
            fallback_file = "backup.m3u"
            timeout_secs = 3

            [device]
            friendly_name = "Living Room"
            device_id = "ABCDEF01"
            tuner_count = 4

            [logging]
            log_dir = "/var/log/iptvhr"
            retention_days = 30
            level = "warn"
            "#,
        )
        .unwrap();

        let settings = Settings::resolve(Args::default(), file).unwrap();

        assert_eq!(settings.listen, "127.0.0.1:5004".parse::<SocketAddr>().unwrap());
        assert_eq!(settings.playlist, PlaylistSource::File(PathBuf::from("/srv/iptv/playlist.m3u")));
        assert_eq!(settings.fallback_file, Some(PathBuf::from("backup.m3u")));
        assert_eq!(settings.timeout, Duration::from_secs(3));
        assert_eq!(settings.location.base_url, "http://tuner.lan:5004");
        assert_eq!(settings.location.lineup_url, "http://tuner.lan:5004/lineup.json");
        assert_eq!(settings.identity.friendly_name, "Living Room");
        assert_eq!(settings.identity.device_id, "ABCDEF01");
        assert_eq!(settings.identity.tuner_count, 4);
        assert_eq!(settings.identity.model_number, "HDTC-2US");
        assert_eq!(settings.log_dir, PathBuf::from("/var/log/iptvhr"));
        assert_eq!(settings.log_retention_days, 30);
        assert_eq!(settings.log_level.as_deref(), Some("warn"));
        assert!(!settings.base_url_is_unroutable());
    }

    #[test]
    fn test_args_override_file() {
        let file: ConfigFile = toml::from_str(
            r#"
            [server]
            listen = "127.0.0.1:5004"
            lineup_url = "http://file/lineup.json"

            [playlist]
            url = "http://file/list.m3u"
            "#,
        )
        .unwrap();
        let args = Args {
            listen: Some("192.168.0.2:7000".parse().unwrap()),
            playlist: Some("https://cli/list.m3u".to_string()),
            lineup_url: Some("http://cli/lineup.json".to_string()),
            timeout: Some(1),
            ..Args::default()
        };

        let settings = Settings::resolve(args, file).unwrap();

        assert_eq!(settings.listen, "192.168.0.2:7000".parse::<SocketAddr>().unwrap());
        assert_eq!(settings.playlist, PlaylistSource::Url("https://cli/list.m3u".to_string()));
        assert_eq!(settings.location.base_url, "http://192.168.0.2:7000");
        assert_eq!(settings.location.lineup_url, "http://cli/lineup.json");
        assert_eq!(settings.timeout, Duration::from_secs(1));
    }

    #[test]
    fn test_invalid_listen() {
        let file: ConfigFile = toml::from_str("[server]\nlisten = \"not-an-address\"\n").unwrap();
        let err = Settings::resolve(args_with_playlist("http://x"), file).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidListen(s) if s == "not-an-address"));
    }

    #[test]
    fn test_load_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[playlist]\nurl = \"http://example.com/list.m3u\"").unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.playlist.url.as_deref(), Some("http://example.com/list.m3u"));
    }

    #[test]
    fn test_load_config_errors() {
        assert!(matches!(
            load_config(Path::new("/nonexistent/iptvhr-proxy.toml")),
            Err(ConfigError::Read { .. })
        ));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[playlist\nurl = ").unwrap();
        assert!(matches!(load_config(file.path()), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_playlist_source_scheme() {
        assert_eq!(
            playlist_source("HTTP://host/list.m3u"),
            PlaylistSource::Url("HTTP://host/list.m3u".to_string())
        );
        assert_eq!(
            playlist_source("Https://host/list.m3u"),
            PlaylistSource::Url("Https://host/list.m3u".to_string())
        );
        assert_eq!(
            playlist_source("playlist.m3u"),
            PlaylistSource::File(PathBuf::from("playlist.m3u"))
        );
        assert_eq!(playlist_source("http"), PlaylistSource::File(PathBuf::from("http")));
        assert_eq!(playlist_source("é"), PlaylistSource::File(PathBuf::from("é")));
    }

    #[test]
    fn test_args_parse() {
        let args = Args::parse_from([
            "iptvhr-proxy",
            "--listen",
            "127.0.0.1:6077",
            "-p",
            "http://example.com/list.m3u",
            "--verbose",
        ]);
        assert_eq!(args.listen, Some("127.0.0.1:6077".parse().unwrap()));
        assert_eq!(args.playlist.as_deref(), Some("http://example.com/list.m3u"));
        assert!(args.verbose);
    }
}
