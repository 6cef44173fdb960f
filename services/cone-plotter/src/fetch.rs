//! HTTP retrieval of base images, cone archives and the GIS index page.
//!
//! Downloads are written to `<name>.partial` and renamed into place once
//! complete. A file under its final name is always a finished download.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, instrument, warn};

/// Something that can fetch remote assets.
#[async_trait]
pub trait AssetFetcher: Send + Sync {
    /// Download `url` into `dir`, skipping the download if the file exists.
    ///
    /// Returns the local path.
    async fn fetch_to_dir(&self, url: &str, dir: &Path) -> Result<PathBuf>;

    /// Fetch a text document.
    async fn fetch_text(&self, url: &str) -> Result<String>;
}

/// Retry and timeout settings.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Maximum number of retry attempts after the first try
    pub max_retries: u32,
    /// Initial retry delay (doubles each retry)
    pub initial_retry_delay: Duration,
    /// Maximum retry delay
    pub max_retry_delay: Duration,
    /// HTTP request timeout
    pub request_timeout: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_retry_delay: Duration::from_secs(2),
            max_retry_delay: Duration::from_secs(30),
            request_timeout: Duration::from_secs(60),
        }
    }
}

/// File name for a URL: the last path segment, query and fragment removed.
pub fn file_name_from_url(url: &str) -> Option<&str> {
    let path = url.split(['?', '#']).next()?;
    let name = path.rsplit('/').next()?;
    if name.is_empty() || name.contains(':') {
        None
    } else {
        Some(name)
    }
}

/// `reqwest`-backed fetcher with exponential backoff.
pub struct Fetcher {
    client: Client,
    config: FetchConfig,
}

impl Fetcher {
    pub fn new(config: FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(Duration::from_secs(15))
            .user_agent(concat!("cone-plotter/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, config })
    }

    /// Run `attempt` until it succeeds or retries are exhausted.
    async fn with_retry<T, F, Fut>(&self, url: &str, mut attempt: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = Result<T>>,
    {
        let mut retry_count = 0;
        let mut delay = self.config.initial_retry_delay;

        loop {
            match attempt().await {
                Ok(value) => return Ok(value),
                Err(e) => {
                    retry_count += 1;
                    if retry_count > self.config.max_retries {
                        return Err(e.context(format!(
                            "Fetching {} failed after {} attempts",
                            url, retry_count
                        )));
                    }

                    warn!(
                        url = %url,
                        error = %e,
                        retry = retry_count,
                        max_retries = self.config.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        "Fetch failed, retrying"
                    );

                    tokio::time::sleep(delay).await;
                    delay = std::cmp::min(delay * 2, self.config.max_retry_delay);
                }
            }
        }
    }

    async fn send(&self, url: &str) -> Result<reqwest::Response> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("HTTP request failed")?;

        match response.status() {
            StatusCode::OK => Ok(response),
            status => Err(anyhow!("HTTP error: {}", status)),
        }
    }

    async fn download_once(&self, url: &str, temp_path: &Path) -> Result<u64> {
        let mut response = self.send(url).await?;

        let mut file = fs::File::create(temp_path)
            .await
            .with_context(|| format!("Failed to create {}", temp_path.display()))?;

        let mut written = 0u64;
        while let Some(chunk) = response
            .chunk()
            .await
            .context("Error reading response chunk")?
        {
            file.write_all(&chunk)
                .await
                .context("Error writing to file")?;
            written += chunk.len() as u64;
        }

        file.flush().await?;
        file.sync_all().await?;
        Ok(written)
    }
}

#[async_trait]
impl AssetFetcher for Fetcher {
    #[instrument(skip(self, dir), fields(url = %url))]
    async fn fetch_to_dir(&self, url: &str, dir: &Path) -> Result<PathBuf> {
        let Some(name) = file_name_from_url(url) else {
            bail!("Cannot derive a file name from {}", url);
        };
        let final_path = dir.join(name);

        if fs::try_exists(&final_path).await.unwrap_or(false) {
            info!(path = %final_path.display(), "File already exists, skipping download");
            return Ok(final_path);
        }

        fs::create_dir_all(dir).await?;
        let temp_path = dir.join(format!("{}.partial", name));

        let temp = temp_path.as_path();
        let bytes = self
            .with_retry(url, move || self.download_once(url, temp))
            .await;
        let bytes = match bytes {
            Ok(bytes) => bytes,
            Err(e) => {
                fs::remove_file(&temp_path).await.ok();
                return Err(e);
            }
        };

        fs::rename(&temp_path, &final_path).await.with_context(|| {
            format!("Failed to move download into {}", final_path.display())
        })?;

        info!(path = %final_path.display(), bytes = bytes, "Download completed");
        Ok(final_path)
    }

    #[instrument(skip(self), fields(url = %url))]
    async fn fetch_text(&self, url: &str) -> Result<String> {
        let text = self
            .with_retry(url, move || async move {
                let response = self.send(url).await?;
                response.text().await.context("Failed to read response body")
            })
            .await?;
        debug!(bytes = text.len(), "Fetched text document");
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quick_config(max_retries: u32) -> FetchConfig {
        FetchConfig {
            max_retries,
            initial_retry_delay: Duration::from_millis(1),
            max_retry_delay: Duration::from_millis(2),
            request_timeout: Duration::from_secs(2),
        }
    }

    #[test]
    fn test_file_name_from_url() {
        assert_eq!(
            file_name_from_url("https://www.nhc.noaa.gov/xgtwo/two_atl_5d0.png"),
            Some("two_atl_5d0.png")
        );
        assert_eq!(
            file_name_from_url("https://host/api/AL052024_CONE_latest.kmz?x=1#top"),
            Some("AL052024_CONE_latest.kmz")
        );
        assert_eq!(file_name_from_url("https://www.nhc.noaa.gov/gis/"), None);
        assert_eq!(file_name_from_url("https:"), None);
    }

    #[tokio::test]
    async fn test_existing_file_is_not_refetched() {
        let dir = tempfile::tempdir().unwrap();
        let existing = dir.path().join("two_atl_5d0.png");
        std::fs::write(&existing, b"cached").unwrap();

        // Nothing listens on this address; a real request would fail.
        let fetcher = Fetcher::new(quick_config(0)).unwrap();
        let path = fetcher
            .fetch_to_dir("http://127.0.0.1:9/xgtwo/two_atl_5d0.png", dir.path())
            .await
            .unwrap();

        assert_eq!(path, existing);
        assert_eq!(std::fs::read(&path).unwrap(), b"cached");
    }

    #[tokio::test]
    async fn test_failed_download_leaves_no_files() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = Fetcher::new(quick_config(1)).unwrap();

        let result = fetcher
            .fetch_to_dir("http://127.0.0.1:9/AL052024_CONE_latest.kmz", dir.path())
            .await;

        assert!(result.is_err());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_retries_are_counted() {
        let fetcher = Fetcher::new(quick_config(2)).unwrap();
        let mut attempts = 0;
        let result: Result<()> = fetcher
            .with_retry("test://retry", || {
                attempts += 1;
                async { Err(anyhow!("boom")) }
            })
            .await;

        assert!(result.is_err());
        assert_eq!(attempts, 3);
    }

    #[tokio::test]
    async fn test_retry_recovers() {
        let fetcher = Fetcher::new(quick_config(3)).unwrap();
        let mut attempts = 0;
        let result = fetcher
            .with_retry("test://retry", || {
                attempts += 1;
                let n = attempts;
                async move {
                    if n < 2 {
                        Err(anyhow!("transient"))
                    } else {
                        Ok(n)
                    }
                }
            })
            .await
            .unwrap();

        assert_eq!(result, 2);
    }
}
