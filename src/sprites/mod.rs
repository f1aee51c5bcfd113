//! Sprite atlas rebuilding.
//!
//! This module does not extract or pack sprites itself. It prepares the
//! output directories and drives the external extraction script and packer
//! executable named in [`SpriteSetConfig`].

pub mod command;
pub mod config;
pub mod rebuild;

pub use command::{CommandOutput, CommandRunner, CommandSpec, SystemRunner};
pub use config::SpriteSetConfig;
pub use rebuild::{collect_pngs, RebuildReport, RemovedOutputs, SpriteRebuilder};
