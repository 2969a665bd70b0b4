//! Gallery-Placer
//!
//! Downloads gallery images over HTTP, pairs each one with a frame template
//! matching its aspect-ratio class and a free placement slot, and emits the
//! resulting placement records for the scene side to instantiate.

use anyhow::Context;
use tracing::info;

mod config;
mod domain;
mod engine;
mod fetch;
mod manifest;
mod sink;

use crate::config::Settings;
use crate::engine::PlacementAllocator;
use crate::fetch::ImageFetcher;
use crate::manifest::GalleryManifest;
use crate::sink::{JsonDocumentSink, PlacementDocument, PlacementSink};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing subscriber for structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("gallery_placer=info".parse().unwrap()),
        )
        .init();

    let settings = Settings::load().context("Failed to load configuration")?;

    info!(
        "Starting Gallery-Placer v{}",
        env!("CARGO_PKG_VERSION")
    );

    let gallery = GalleryManifest::load(&settings.manifest.path)
        .with_context(|| format!("Failed to load manifest {}", settings.manifest.path.display()))?;

    // Download everything first; allocation starts only after the whole
    // batch has settled
    let fetcher = ImageFetcher::new(&settings.fetch);
    let batch = fetcher.fetch_all(&gallery.urls).await;

    let mut allocator = PlacementAllocator::new(
        batch.images,
        gallery.slots,
        gallery.frame_templates,
        gallery.options,
    );
    let records = allocator.allocate_all();

    info!(
        placed = records.len(),
        unplaced_images = allocator.unplaced_images().len(),
        free_slots = allocator.available_slots().len(),
        failed_downloads = batch.failed_count,
        "Allocation complete"
    );

    let sink = JsonDocumentSink::new(settings.output.path);
    sink.write(&PlacementDocument::new(records))
        .await
        .context("Failed to write placement document")?;

    Ok(())
}
