//! Downloaded image assets and orientation classification

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Aspect-ratio class of an image
///
/// Derived from the width/height ratio, never stored on the asset itself.
/// The classification is exact: a 101x100 image is `Landscape`, not `Square`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    Landscape,
    Portrait,
    Square,
}

impl Orientation {
    /// Classify a width/height pair.
    ///
    /// `ratio > 1` is landscape, `ratio < 1` is portrait, `ratio == 1` is
    /// square. No tolerance is applied; near-square images fall on whichever
    /// side of 1.0 their exact ratio lands.
    pub fn classify(width: u32, height: u32) -> Orientation {
        let ratio = width as f32 / height as f32;

        if ratio > 1.0 {
            Orientation::Landscape
        } else if ratio < 1.0 {
            Orientation::Portrait
        } else {
            Orientation::Square
        }
    }
}

impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Orientation::Landscape => write!(f, "landscape"),
            Orientation::Portrait => write!(f, "portrait"),
            Orientation::Square => write!(f, "square"),
        }
    }
}

/// A successfully downloaded and decoded image
///
/// Constructed only by the fetcher from a payload that decoded cleanly, so
/// width and height are always positive. Immutable after construction; the
/// allocator holds these by value but never mutates them.
#[derive(Debug, Clone)]
pub struct ImageAsset {
    /// Stable identity for logs and output records
    pub id: Uuid,
    /// Source URL the payload was fetched from
    pub source_url: String,
    /// Pixel width
    pub width: u32,
    /// Pixel height
    pub height: u32,
    /// Raw payload, kept for downstream consumers (texture binding)
    pub payload: Bytes,
}

impl ImageAsset {
    /// Build an asset from a decoded payload.
    pub fn new(source_url: impl Into<String>, width: u32, height: u32, payload: Bytes) -> Self {
        ImageAsset {
            id: Uuid::new_v4(),
            source_url: source_url.into(),
            width,
            height,
            payload,
        }
    }

    /// Aspect-ratio class of this image. Recomputed on each call.
    pub fn orientation(&self) -> Orientation {
        Orientation::classify(self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset(width: u32, height: u32) -> ImageAsset {
        ImageAsset::new("https://example.com/a.png", width, height, Bytes::new())
    }

    #[test]
    fn test_wide_image_is_landscape() {
        assert_eq!(asset(200, 100).orientation(), Orientation::Landscape);
    }

    #[test]
    fn test_tall_image_is_portrait() {
        assert_eq!(asset(100, 200).orientation(), Orientation::Portrait);
    }

    #[test]
    fn test_equal_sides_is_square() {
        assert_eq!(asset(100, 100).orientation(), Orientation::Square);
    }

    #[test]
    fn test_near_square_classifies_landscape() {
        // Exact ratio comparison, no epsilon
        assert_eq!(asset(101, 100).orientation(), Orientation::Landscape);
    }

    #[test]
    fn test_near_square_tall_classifies_portrait() {
        assert_eq!(asset(100, 101).orientation(), Orientation::Portrait);
    }

    #[test]
    fn test_orientation_serde_casing() {
        let json = serde_json::to_string(&Orientation::Landscape).unwrap();
        assert_eq!(json, "\"landscape\"");
        let back: Orientation = serde_json::from_str("\"square\"").unwrap();
        assert_eq!(back, Orientation::Square);
    }
}
