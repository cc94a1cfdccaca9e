//! Playlist retrieval.

use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{debug, info, warn};

use crate::error::{FetchError, Result};

/// Where playlist text is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaylistSource {
    /// Remote playlist fetched over HTTP(S).
    Url(String),
    /// Playlist file on the local filesystem.
    File(PathBuf),
}

impl std::fmt::Display for PlaylistSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlaylistSource::Url(url) => write!(f, "{}", url),
            PlaylistSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Retrieves raw playlist text from a configured source.
///
/// Each call performs one read; nothing is cached and failures are not
/// retried.
#[derive(Debug, Clone)]
pub struct PlaylistFetcher {
    client: reqwest::Client,
    source: PlaylistSource,
    fallback: Option<PathBuf>,
}

impl PlaylistFetcher {
    /// Create a fetcher whose HTTP requests give up after `timeout`.
    pub fn new(source: PlaylistSource, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(FetchError::Client)?;
        Ok(Self {
            client,
            source,
            fallback: None,
        })
    }

    /// Read this file when the primary source fails.
    pub fn with_fallback(mut self, path: impl Into<PathBuf>) -> Self {
        self.fallback = Some(path.into());
        self
    }

    /// Fetch the playlist text.
    ///
    /// If the primary source fails and a fallback file is set, the fallback
    /// is tried. When both fail the primary error is returned.
    pub async fn fetch(&self) -> Result<String> {
        self.fetch_with_origin().await.map(|(text, _)| text)
    }

    /// Fetch the playlist text along with the source it was read from.
    pub async fn fetch_with_origin(&self) -> Result<(String, PlaylistSource)> {
        let primary = match &self.source {
            PlaylistSource::Url(url) => self.fetch_url(url).await,
            PlaylistSource::File(path) => read_file(path).await,
        };

        let err = match primary {
            Ok(text) => return Ok((text, self.source.clone())),
            Err(e) => e,
        };

        let Some(fallback) = &self.fallback else {
            return Err(err);
        };

        warn!("Playlist source {} failed ({}), trying fallback {:?}", self.source, err, fallback);
        match read_file(fallback).await {
            Ok(text) => {
                info!("Loaded playlist from fallback file {:?}", fallback);
                Ok((text, PlaylistSource::File(fallback.clone())))
            }
            Err(fallback_err) => {
                warn!("Fallback playlist failed: {}", fallback_err);
                Err(err)
            }
        }
    }

    async fn fetch_url(&self, url: &str) -> Result<String> {
        debug!("Requesting playlist from {}", url);
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let text = response.text().await?;
        non_empty(text)
    }
}

async fn read_file(path: &Path) -> Result<String> {
    debug!("Reading playlist file {:?}", path);
    let bytes = tokio::fs::read(path).await.map_err(|source| FetchError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    // Same lossy decoding as `Response::text` for undeclared charsets.
    non_empty(String::from_utf8_lossy(&bytes).into_owned())
}

fn non_empty(text: String) -> Result<String> {
    if text.trim().is_empty() {
        Err(FetchError::EmptyBody)
    } else {
        Ok(text)
    }
}
