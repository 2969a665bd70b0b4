//! Batch image downloading
//!
//! Fetches every manifest URL concurrently, decodes dimensions, and hands the
//! allocator an ordered list of the successes. Failures are logged and
//! skipped per URL; a failed URL leaves no placeholder in the output.

mod downloader;

pub use downloader::{BatchFetchResult, FetchError, ImageFetcher};
