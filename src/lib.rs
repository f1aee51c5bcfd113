//! # Asset Pipeline
//!
//! Small build-time tools for game assets.
//!
//! ## Overview
//!
//! - [`texture`]: fixes the color of fully transparent pixels in PNG
//!   textures so bilinear filtering does not darken sprite edges.
//! - [`sprites`]: rebuilds a named sprite atlas by running an external
//!   extraction script and sprite packer.
//!
//! The two tools share nothing except the error type.
//!
//! ## Quick Start
//!
//! ```ignore
//! use asset_pipeline::{clean_textures, CleanerConfig};
//!
//! let report = clean_textures("dist/assets/textures", CleanerConfig::default())?;
//! println!("{} textures cleaned", report.processed);
//! ```
//!
//! ```ignore
//! use asset_pipeline::{SpriteRebuilder, SpriteSetConfig, SystemRunner};
//!
//! let config = SpriteSetConfig::from_json_file("sprites.json")?;
//! let report = SpriteRebuilder::new(config, SystemRunner).rebuild()?;
//! ```

pub mod error;
pub mod texture;
pub mod sprites;

// Re-export main types for convenience
pub use error::{PipelineError, Result};
pub use texture::{
    bleed_transparent, BleedStats, CleanReport, CleanerConfig, FileOutcome, TextureCleaner,
    TextureData,
};
pub use sprites::{
    CommandOutput, CommandRunner, CommandSpec, RebuildReport, SpriteRebuilder, SpriteSetConfig,
    SystemRunner,
};

/// Clean every PNG under `dir` in place.
pub fn clean_textures<P: AsRef<std::path::Path>>(dir: P, config: CleanerConfig) -> Result<CleanReport> {
    TextureCleaner::new(config).clean_directory(dir)
}

/// Rebuild a sprite atlas using real child processes.
pub fn rebuild_sprites(config: SpriteSetConfig) -> Result<RebuildReport> {
    SpriteRebuilder::new(config, SystemRunner).rebuild()
}
