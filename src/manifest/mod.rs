//! Gallery manifest loading
//!
//! The manifest is the hand-off from scene configuration: the image URLs to
//! download, the free placement slots, the ordered frame template list, and
//! the selection options for the allocator.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::info;
use url::Url;

use crate::domain::{FrameTemplate, Orientation, Slot, TemplateError};
use crate::engine::AllocatorOptions;

/// Manifest loading errors
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid URL in manifest: {0}")]
    InvalidUrl(String),

    #[error("Invalid frame template: {0}")]
    Template(#[from] TemplateError),
}

#[derive(Debug, Deserialize)]
struct RawFrameTemplate {
    id: String,
    orientation: Orientation,
}

#[derive(Debug, Deserialize)]
struct RawManifest {
    #[serde(default)]
    urls: Vec<String>,
    #[serde(default)]
    slots: Vec<Slot>,
    #[serde(default)]
    frame_templates: Vec<RawFrameTemplate>,
    #[serde(default)]
    options: AllocatorOptions,
}

/// A validated gallery manifest
#[derive(Debug)]
pub struct GalleryManifest {
    /// Image URLs to fetch, in download order
    pub urls: Vec<String>,
    /// Free placement slots, in configuration order
    pub slots: Vec<Slot>,
    /// Frame templates; order is the tie-break for shared orientations
    pub frame_templates: Vec<FrameTemplate>,
    /// Selection options for the allocator
    pub options: AllocatorOptions,
}

impl GalleryManifest {
    /// Load and validate a manifest from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let content = std::fs::read_to_string(path)?;
        let manifest = Self::from_json(&content)?;

        info!(
            path = %path.display(),
            urls = manifest.urls.len(),
            slots = manifest.slots.len(),
            templates = manifest.frame_templates.len(),
            "Loaded gallery manifest"
        );

        Ok(manifest)
    }

    /// Parse and validate manifest JSON.
    ///
    /// Malformed entries (unparseable URLs, empty template ids) are
    /// construction-time errors here; an empty template list is not — the
    /// allocator treats it as immediate exhaustion.
    pub fn from_json(content: &str) -> Result<Self, ManifestError> {
        let raw: RawManifest = serde_json::from_str(content)?;

        for url in &raw.urls {
            Url::parse(url).map_err(|_| ManifestError::InvalidUrl(url.clone()))?;
        }

        let frame_templates = raw
            .frame_templates
            .into_iter()
            .map(|t| FrameTemplate::new(t.id, t.orientation))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(GalleryManifest {
            urls: raw.urls,
            slots: raw.slots,
            frame_templates,
            options: raw.options,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"{
        "urls": ["https://example.com/a.png", "https://example.com/b.jpg"],
        "slots": [
            {"id": "wall-north-1", "transform": {"position": [1.0, 1.6, -3.0], "rotation": [0.0, 180.0, 0.0]}},
            {"id": "wall-north-2"}
        ],
        "frame_templates": [
            {"id": "gold-wide", "orientation": "landscape"},
            {"id": "oak-tall", "orientation": "portrait"},
            {"id": "plain-square", "orientation": "square"}
        ],
        "options": {
            "randomize_image_selection": true,
            "debug_logging": true
        }
    }"#;

    #[test]
    fn test_parse_full_manifest() {
        let manifest = GalleryManifest::from_json(MANIFEST).unwrap();
        assert_eq!(manifest.urls.len(), 2);
        assert_eq!(manifest.slots.len(), 2);
        assert_eq!(manifest.frame_templates.len(), 3);
        assert!(manifest.options.randomize_image_selection);
        assert!(!manifest.options.randomize_slot_selection);
        assert!(manifest.options.debug_logging);

        assert_eq!(manifest.slots[0].transform.position, [1.0, 1.6, -3.0]);
        // Missing transform defaults to the origin
        assert_eq!(manifest.slots[1].transform.position, [0.0, 0.0, 0.0]);
        assert_eq!(manifest.frame_templates[1].orientation, Orientation::Portrait);
    }

    #[test]
    fn test_missing_sections_default_empty() {
        let manifest = GalleryManifest::from_json("{}").unwrap();
        assert!(manifest.urls.is_empty());
        assert!(manifest.slots.is_empty());
        assert!(manifest.frame_templates.is_empty());
        assert!(!manifest.options.randomize_image_selection);
    }

    #[test]
    fn test_bad_url_rejected() {
        let content = r#"{"urls": ["not a url"]}"#;
        assert!(matches!(
            GalleryManifest::from_json(content),
            Err(ManifestError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_empty_template_id_rejected() {
        let content = r#"{"frame_templates": [{"id": "", "orientation": "square"}]}"#;
        assert!(matches!(
            GalleryManifest::from_json(content),
            Err(ManifestError::Template(TemplateError::EmptyId))
        ));
    }

    #[test]
    fn test_unknown_orientation_rejected() {
        let content = r#"{"frame_templates": [{"id": "x", "orientation": "panoramic"}]}"#;
        assert!(matches!(
            GalleryManifest::from_json(content),
            Err(ManifestError::Json(_))
        ));
    }
}
