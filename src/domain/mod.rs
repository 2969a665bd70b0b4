//! Domain types and models

mod image;
mod placement;

pub use image::{ImageAsset, Orientation};
pub use placement::{FrameTemplate, PlacementRecord, Slot, TemplateError, Transform};
