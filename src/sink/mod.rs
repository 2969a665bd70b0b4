//! Output contract to the scene-placement collaborator
//!
//! The allocator only decides (image, frame template, slot) triples; turning
//! each one into an instantiated scene object is the collaborator's job. The
//! sink hands the records over as a JSON document.

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::domain::PlacementRecord;

/// Sink errors
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Document written for the scene-placement collaborator
#[derive(Debug, Serialize)]
pub struct PlacementDocument {
    pub generated_at: DateTime<Utc>,
    pub record_count: usize,
    pub records: Vec<PlacementRecord>,
}

impl PlacementDocument {
    pub fn new(records: Vec<PlacementRecord>) -> Self {
        PlacementDocument {
            generated_at: Utc::now(),
            record_count: records.len(),
            records,
        }
    }
}

/// Destination for finished placement records
#[async_trait]
pub trait PlacementSink {
    async fn write(&self, document: &PlacementDocument) -> Result<(), SinkError>;
}

/// Writes the placement document as pretty JSON to a file, or to stdout when
/// no path is configured
pub struct JsonDocumentSink {
    path: Option<PathBuf>,
}

impl JsonDocumentSink {
    pub fn new(path: Option<PathBuf>) -> Self {
        JsonDocumentSink { path }
    }
}

#[async_trait]
impl PlacementSink for JsonDocumentSink {
    async fn write(&self, document: &PlacementDocument) -> Result<(), SinkError> {
        let json = serde_json::to_string_pretty(document)?;

        match &self.path {
            Some(path) => {
                tokio::fs::write(path, &json).await?;
                info!(
                    path = %path.display(),
                    records = document.record_count,
                    "Wrote placement document"
                );
            }
            None => {
                println!("{json}");
            }
        }

        Ok(())
    }
}
