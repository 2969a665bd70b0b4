//! Placement allocation
//!
//! Pairs downloaded images with orientation-matched frame templates and free
//! placement slots. Runs synchronously over collections it owns exclusively;
//! exhaustion of any input is a normal stop, not an error.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;
use tracing::debug;

use crate::domain::{FrameTemplate, ImageAsset, PlacementRecord, Slot};

/// Selection behavior for a single allocation run
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct AllocatorOptions {
    /// Draw a uniformly random remaining image instead of the next in input order
    pub randomize_image_selection: bool,
    /// Draw a uniformly random remaining slot instead of the next in input order
    pub randomize_slot_selection: bool,
    /// Emit per-step progress logs; no behavioral effect
    pub debug_logging: bool,
    /// Fixed RNG seed for reproducible randomized runs; entropy-seeded if absent
    pub seed: Option<u64>,
}

/// Allocates (image, frame template, slot) triples until any input runs out
///
/// Owns its collections for the duration of the run; nothing external may
/// mutate them while `allocate_all` executes.
pub struct PlacementAllocator {
    unplaced_images: Vec<ImageAsset>,
    available_slots: Vec<Slot>,
    frame_templates: Vec<FrameTemplate>,
    used_slots: Vec<Slot>,
    // (image, frame template id) pairs, kept for introspection only
    placed_images: Vec<(ImageAsset, String)>,
    options: AllocatorOptions,
    rng: StdRng,
}

impl PlacementAllocator {
    /// Create an allocator over the fetched images, the configured slots, and
    /// the ordered frame template list.
    pub fn new(
        images: Vec<ImageAsset>,
        slots: Vec<Slot>,
        frame_templates: Vec<FrameTemplate>,
        options: AllocatorOptions,
    ) -> Self {
        let rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        PlacementAllocator {
            unplaced_images: images,
            available_slots: slots,
            frame_templates,
            used_slots: Vec::new(),
            placed_images: Vec::new(),
            options,
            rng,
        }
    }

    /// Run allocation to completion and return the records in placement order.
    ///
    /// Iterates at most as many times as there were unplaced images when the
    /// call started (snapshot bound). Stops early when images, slots, or a
    /// matching frame template run out; a drawn image or slot whose
    /// counterpart is exhausted goes back to its pool before stopping.
    pub fn allocate_all(&mut self) -> Vec<PlacementRecord> {
        if self.options.debug_logging {
            debug!(
                images = self.unplaced_images.len(),
                slots = self.available_slots.len(),
                templates = self.frame_templates.len(),
                "Starting placement"
            );
        }

        let mut records = Vec::new();
        let total_count = self.unplaced_images.len();

        for _ in 0..total_count {
            let Some(image) = self.draw_image() else {
                break;
            };

            let Some(slot) = self.draw_slot() else {
                // Slots exhausted before the image could be placed
                self.unplaced_images.insert(0, image);
                break;
            };

            let Some(template) = self.find_template(&image) else {
                // No frame for this orientation; put both draws back and stop
                if self.options.debug_logging {
                    debug!(
                        orientation = %image.orientation(),
                        "No frame template for orientation, stopping placement"
                    );
                }
                self.available_slots.insert(0, slot);
                self.unplaced_images.insert(0, image);
                break;
            };
            let template = template.clone();

            let record = PlacementRecord::new(records.len(), &image, &template, &slot);
            if self.options.debug_logging {
                debug!(
                    image = %image.id,
                    frame = %template.id,
                    slot = %slot.id,
                    "Placed image"
                );
            }

            records.push(record);
            self.used_slots.push(slot);
            self.placed_images.push((image, template.id));
        }

        if self.options.debug_logging {
            debug!(placed = records.len(), "Placement finished");
        }

        records
    }

    /// Draw the next image per the configured selection policy.
    fn draw_image(&mut self) -> Option<ImageAsset> {
        if self.unplaced_images.is_empty() {
            return None;
        }

        let index = if self.options.randomize_image_selection {
            // Uniform over every remaining element, re-drawn at the current size
            self.rng.gen_range(0..self.unplaced_images.len())
        } else {
            0
        };

        Some(self.unplaced_images.remove(index))
    }

    /// Draw the next free slot per the configured selection policy.
    fn draw_slot(&mut self) -> Option<Slot> {
        if self.available_slots.is_empty() {
            return None;
        }

        let index = if self.options.randomize_slot_selection {
            self.rng.gen_range(0..self.available_slots.len())
        } else {
            0
        };

        Some(self.available_slots.remove(index))
    }

    /// First template in fixed order whose orientation matches the image.
    fn find_template(&self, image: &ImageAsset) -> Option<&FrameTemplate> {
        let orientation = image.orientation();
        self.frame_templates
            .iter()
            .find(|template| template.orientation == orientation)
    }

    /// Images not yet placed.
    pub fn unplaced_images(&self) -> &[ImageAsset] {
        &self.unplaced_images
    }

    /// Slots still free.
    pub fn available_slots(&self) -> &[Slot] {
        &self.available_slots
    }

    /// Slots consumed by placement, in placement order.
    pub fn used_slots(&self) -> &[Slot] {
        &self.used_slots
    }

    /// Placed images with the frame template id each one received.
    pub fn placed_images(&self) -> &[(ImageAsset, String)] {
        &self.placed_images
    }
}
