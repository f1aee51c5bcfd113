//! Texture alpha fixing.
//!
//! Rewrites the RGB of fully transparent pixels so filtered sampling at
//! sprite edges blends toward the sprite's own colors instead of black.

mod data;
pub mod bleed;
pub mod cleaner;

pub use bleed::{bleed_transparent, find_donor, BleedStats};
pub use cleaner::{CleanReport, CleanerConfig, FileOutcome, TextureCleaner};
pub use data::TextureData;
