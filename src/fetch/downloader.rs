//! Concurrent image downloader with skip-on-failure semantics

use std::sync::Arc;
use std::time::Duration;

use image::GenericImageView;
use thiserror::Error;
use tokio::sync::Semaphore;
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::config::FetchSettings;
use crate::domain::ImageAsset;

/// Errors that can occur while fetching a single image
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    BadStatus { status: u16, url: String },

    #[error("Failed to decode image payload: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Download task panicked: {0}")]
    TaskJoin(String),
}

/// Result of fetching a batch of URLs
#[derive(Debug, Default)]
pub struct BatchFetchResult {
    /// Successfully fetched images, in manifest URL order
    pub images: Vec<ImageAsset>,
    /// Number of URLs that failed (network, status, or decode)
    pub failed_count: usize,
    /// Total wall time for the batch in milliseconds
    pub total_time_ms: u64,
}

/// Downloads gallery images over HTTP
pub struct ImageFetcher {
    client: reqwest::Client,
    /// Maximum concurrent downloads
    concurrency: usize,
}

impl ImageFetcher {
    /// Create a fetcher from the configured timeouts and concurrency.
    pub fn new(settings: &FetchSettings) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .connect_timeout(Duration::from_secs(settings.connect_timeout_secs))
            .user_agent("gallery-placer/1.0")
            .build()
            .expect("Failed to create HTTP client");

        ImageFetcher {
            client,
            concurrency: settings.concurrency.clamp(1, 50),
        }
    }

    /// Fetch every URL concurrently and return the successes in input order.
    ///
    /// This is the synchronization barrier before allocation: the future
    /// resolves only after every URL has either produced an image or been
    /// logged and skipped.
    #[instrument(skip(self, urls), fields(url_count = urls.len()))]
    pub async fn fetch_all(&self, urls: &[String]) -> BatchFetchResult {
        let start = std::time::Instant::now();
        let semaphore = Arc::new(Semaphore::new(self.concurrency));

        let mut handles = Vec::with_capacity(urls.len());
        for (index, url) in urls.iter().enumerate() {
            let semaphore = semaphore.clone();
            let client = self.client.clone();
            let url = url.clone();

            handles.push(tokio::spawn(async move {
                let _permit = semaphore.acquire().await.expect("semaphore closed");
                (index, fetch_one(&client, &url).await)
            }));
        }

        let mut results = Vec::with_capacity(handles.len());
        for joined in futures::future::join_all(handles).await {
            match joined {
                Ok(result) => results.push(result),
                Err(e) => {
                    // The index is lost with the task, so this slot simply
                    // stays empty, like any other failed URL
                    results.push((usize::MAX, Err(FetchError::TaskJoin(e.to_string()))));
                }
            }
        }

        let mut batch = assemble(results, urls.len());
        batch.total_time_ms = start.elapsed().as_millis() as u64;

        info!(
            fetched = batch.images.len(),
            failed = batch.failed_count,
            elapsed_ms = batch.total_time_ms,
            "Image batch download finished"
        );

        batch
    }
}

/// Fetch and decode a single image URL.
async fn fetch_one(client: &reqwest::Client, url: &str) -> Result<ImageAsset, FetchError> {
    Url::parse(url).map_err(|_| FetchError::InvalidUrl(url.to_string()))?;

    debug!(%url, "Downloading image");
    let response = client.get(url).send().await?;

    if !response.status().is_success() {
        return Err(FetchError::BadStatus {
            status: response.status().as_u16(),
            url: url.to_string(),
        });
    }

    let payload = response.bytes().await?;
    let (width, height) = image::load_from_memory(&payload)?.dimensions();

    debug!(%url, width, height, size_bytes = payload.len(), "Downloaded image");
    Ok(ImageAsset::new(url, width, height, payload))
}

/// Order the per-URL outcomes back into manifest order, dropping failures.
fn assemble(
    results: Vec<(usize, Result<ImageAsset, FetchError>)>,
    url_count: usize,
) -> BatchFetchResult {
    let mut ordered: Vec<Option<ImageAsset>> = (0..url_count).map(|_| None).collect();
    let mut failed_count = 0;

    for (index, result) in results {
        match result {
            Ok(asset) => {
                if index < url_count {
                    ordered[index] = Some(asset);
                }
            }
            Err(e) => {
                failed_count += 1;
                warn!(error = %e, "Failed to download URL");
            }
        }
    }

    BatchFetchResult {
        images: ordered.into_iter().flatten().collect(),
        failed_count,
        total_time_ms: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn asset(url: &str) -> ImageAsset {
        ImageAsset::new(url, 200, 100, Bytes::new())
    }

    #[test]
    fn test_assemble_preserves_manifest_order() {
        // Completion order is scrambled; output must follow the index
        let results = vec![
            (2, Ok(asset("https://example.com/c.png"))),
            (0, Ok(asset("https://example.com/a.png"))),
            (1, Ok(asset("https://example.com/b.png"))),
        ];

        let batch = assemble(results, 3);
        let urls: Vec<_> = batch.images.iter().map(|i| i.source_url.as_str()).collect();
        assert_eq!(
            urls,
            [
                "https://example.com/a.png",
                "https://example.com/b.png",
                "https://example.com/c.png"
            ]
        );
        assert_eq!(batch.failed_count, 0);
    }

    #[test]
    fn test_assemble_drops_failures_without_placeholder() {
        let results = vec![
            (0, Ok(asset("https://example.com/a.png"))),
            (
                1,
                Err(FetchError::BadStatus {
                    status: 404,
                    url: "https://example.com/missing.png".to_string(),
                }),
            ),
            (2, Ok(asset("https://example.com/c.png"))),
        ];

        let batch = assemble(results, 3);
        assert_eq!(batch.images.len(), 2);
        assert_eq!(batch.failed_count, 1);
        assert_eq!(batch.images[1].source_url, "https://example.com/c.png");
    }

    #[test]
    fn test_invalid_url_fails_without_network() {
        let settings = FetchSettings::default();
        let fetcher = ImageFetcher::new(&settings);

        let batch = tokio_test::block_on(
            fetcher.fetch_all(&["not a url at all".to_string()]),
        );
        assert!(batch.images.is_empty());
        assert_eq!(batch.failed_count, 1);
    }

    #[test]
    fn test_concurrency_is_clamped() {
        let settings = FetchSettings {
            concurrency: 0,
            ..Default::default()
        };
        let fetcher = ImageFetcher::new(&settings);
        assert_eq!(fetcher.concurrency, 1);
    }
}
