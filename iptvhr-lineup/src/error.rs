//! Error types for playlist retrieval.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to retrieve playlist text.
///
/// Parsing never fails, so this is the only error the lineup core produces.
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Network or transport failure while requesting the playlist.
    #[error("Failed to request playlist: {0}")]
    Transport(#[from] reqwest::Error),

    /// Server answered with a non-success status.
    #[error("Playlist request returned status {0}")]
    Status(reqwest::StatusCode),

    /// Source returned no content.
    #[error("Playlist is empty")]
    EmptyBody,

    /// Local playlist file could not be read.
    #[error("Failed to read playlist file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result alias for fetch operations.
pub type Result<T> = std::result::Result<T, FetchError>;
