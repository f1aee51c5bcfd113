//! Sprite atlas rebuild: clean, extract, collect, pack.

use super::command::{CommandRunner, CommandSpec};
use super::config::SpriteSetConfig;
use crate::error::Result;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Which previous outputs were found and removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RemovedOutputs {
    pub atlas_image: bool,
    pub atlas_file: bool,
    pub extract_dir: bool,
}

/// Result of a successful rebuild.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RebuildReport {
    pub removed: RemovedOutputs,
    /// Sprites handed to the packer, in the order passed.
    pub sprites: Vec<PathBuf>,
}

/// Drives the external extraction and packing tools for one sprite set.
pub struct SpriteRebuilder<R: CommandRunner> {
    config: SpriteSetConfig,
    runner: R,
}

impl<R: CommandRunner> SpriteRebuilder<R> {
    pub fn new(config: SpriteSetConfig, runner: R) -> Self {
        Self { config, runner }
    }

    /// Give back the runner (useful for inspecting test fakes).
    pub fn into_runner(self) -> R {
        self.runner
    }

    /// Run the whole pipeline. Stops at the first failing step; the packer
    /// never runs if extraction fails.
    pub fn rebuild(&mut self) -> Result<RebuildReport> {
        self.config.validate()?;
        self.config.make_root_absolute()?;
        info!("Rebuilding sprite set '{}'", self.config.name);

        let removed = self.clean_previous_outputs()?;
        self.extract()?;

        let sprites = collect_pngs(&self.config.extract_dir())?;
        info!(
            "Found {} sprites: {:?}",
            sprites.len(),
            sprites
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
        );

        self.pack(&sprites)?;
        Ok(RebuildReport { removed, sprites })
    }

    /// Delete the atlas image, atlas file and extracted sprite directory if
    /// they exist.
    pub fn clean_previous_outputs(&self) -> Result<RemovedOutputs> {
        let mut removed = RemovedOutputs::default();

        let atlas_image = self.config.atlas_image();
        if atlas_image.exists() {
            std::fs::remove_file(&atlas_image)?;
            info!("Removed {}", atlas_image.display());
            removed.atlas_image = true;
        }

        let atlas_file = self.config.atlas_file();
        if atlas_file.exists() {
            std::fs::remove_file(&atlas_file)?;
            info!("Removed {}", atlas_file.display());
            removed.atlas_file = true;
        }

        let extract_dir = self.config.extract_dir();
        if extract_dir.exists() {
            std::fs::remove_dir_all(&extract_dir)?;
            info!("Removed {}", extract_dir.display());
            removed.extract_dir = true;
        }

        Ok(removed)
    }

    /// `<interpreter> <script> <list> <extract_dir> --gimp <editor>`
    pub fn extract_command(&self) -> CommandSpec {
        CommandSpec::new(&self.config.interpreter)
            .arg(self.config.extract_script_path())
            .arg(self.config.list_file())
            .arg(self.config.extract_dir())
            .args(["--gimp", self.config.image_editor.as_str()])
            .current_dir(&self.config.root)
    }

    /// `<packer> <dist_dir>/ <sprite>...`
    pub fn pack_command(&self, sprites: &[PathBuf]) -> CommandSpec {
        let mut out_dir = self.config.atlas_dir().into_os_string();
        out_dir.push("/");
        CommandSpec::new(self.config.packer_path())
            .arg(out_dir)
            .args(sprites)
            .current_dir(&self.config.root)
    }

    fn extract(&mut self) -> Result<()> {
        let cmd = self.extract_command();
        info!("Running {}", cmd);
        self.runner.run(&cmd)?.into_checked(cmd.program_name())?;
        Ok(())
    }

    fn pack(&mut self, sprites: &[PathBuf]) -> Result<()> {
        let cmd = self.pack_command(sprites);
        info!("Running {}", cmd);
        self.runner.run(&cmd)?.into_checked(cmd.program_name())?;
        Ok(())
    }
}

/// PNG files directly inside `dir` (no recursion), sorted.
///
/// The suffix match is case-sensitive. A missing directory yields no
/// sprites, so an extraction run that wrote nothing still reaches the packer.
pub fn collect_pngs(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!("{} does not exist, no sprites to pack", dir.display());
            return Ok(Vec::new());
        }
        Err(e) => return Err(e.into()),
    };

    let mut pngs = Vec::new();
    for entry in entries {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        if entry.file_name().to_string_lossy().ends_with(".png") {
            pngs.push(entry.path());
        }
    }
    pngs.sort();
    Ok(pngs)
}
