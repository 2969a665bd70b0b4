//! Placement slots, frame templates, and allocation output records

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::image::{ImageAsset, Orientation};

/// Frame template construction errors
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Frame template id must not be empty")]
    EmptyId,
}

/// World-space transform of a placement slot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Position (x, y, z)
    pub position: [f32; 3],
    /// Rotation as Euler angles in degrees (x, y, z)
    pub rotation: [f32; 3],
}

impl Default for Transform {
    fn default() -> Self {
        Transform {
            position: [0.0, 0.0, 0.0],
            rotation: [0.0, 0.0, 0.0],
        }
    }
}

/// A fixed placement location capable of hosting one frame+image pair
///
/// Opaque to the allocator beyond identity: the transform rides along for the
/// scene-side collaborator. A slot is used at most once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    pub id: String,
    #[serde(default)]
    pub transform: Transform,
}

impl Slot {
    pub fn new(id: impl Into<String>) -> Self {
        Slot {
            id: id.into(),
            transform: Transform::default(),
        }
    }
}

/// A reusable frame definition tagged with the single orientation it accepts
///
/// Several templates may share an orientation; the allocator always picks the
/// first match in template order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameTemplate {
    pub id: String,
    pub orientation: Orientation,
}

impl FrameTemplate {
    /// Create a template, rejecting malformed definitions up front.
    pub fn new(id: impl Into<String>, orientation: Orientation) -> Result<Self, TemplateError> {
        let id = id.into();
        if id.is_empty() {
            return Err(TemplateError::EmptyId);
        }
        Ok(FrameTemplate { id, orientation })
    }
}

/// The allocator's output unit binding one image, one frame template, and one slot
///
/// Immutable once created. The frame template's orientation always equals the
/// image's orientation.
#[derive(Debug, Clone, Serialize)]
pub struct PlacementRecord {
    /// Position of this record in allocation order, starting at 0
    pub index: usize,
    pub image_id: Uuid,
    pub image_url: String,
    pub image_width: u32,
    pub image_height: u32,
    pub orientation: Orientation,
    pub frame_template_id: String,
    pub slot_id: String,
    pub slot_transform: Transform,
}

impl PlacementRecord {
    pub fn new(index: usize, image: &ImageAsset, template: &FrameTemplate, slot: &Slot) -> Self {
        PlacementRecord {
            index,
            image_id: image.id,
            image_url: image.source_url.clone(),
            image_width: image.width,
            image_height: image.height,
            orientation: image.orientation(),
            frame_template_id: template.id.clone(),
            slot_id: slot.id.clone(),
            slot_transform: slot.transform,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    #[test]
    fn test_empty_template_id_rejected() {
        assert!(matches!(
            FrameTemplate::new("", Orientation::Square),
            Err(TemplateError::EmptyId)
        ));
    }

    #[test]
    fn test_record_carries_image_orientation() {
        let image = ImageAsset::new("https://example.com/wide.jpg", 300, 200, Bytes::new());
        let template = FrameTemplate::new("gold-wide", Orientation::Landscape).unwrap();
        let slot = Slot::new("wall-1");

        let record = PlacementRecord::new(0, &image, &template, &slot);
        assert_eq!(record.orientation, Orientation::Landscape);
        assert_eq!(record.frame_template_id, "gold-wide");
        assert_eq!(record.slot_id, "wall-1");
    }

    #[test]
    fn test_slot_default_transform() {
        let slot = Slot::new("wall-2");
        assert_eq!(slot.transform.position, [0.0, 0.0, 0.0]);
        assert_eq!(slot.transform.rotation, [0.0, 0.0, 0.0]);
    }
}
