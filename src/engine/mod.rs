//! Placement engine
//!
//! This module contains the core allocation logic pairing downloaded images
//! with orientation-matched frame templates and free placement slots.

mod allocator;

pub use allocator::{AllocatorOptions, PlacementAllocator};
