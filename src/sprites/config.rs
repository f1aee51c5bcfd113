//! Sprite set configuration.

use crate::error::{PipelineError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Where a sprite set's sources and outputs live, and which tools build it.
///
/// Relative paths are resolved against `root`. `interpreter` and
/// `image_editor` are passed through untouched so they can be bare program
/// names looked up on `PATH`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpriteSetConfig {
    /// Sprite set name, shared by the `.xcf` and `.list` files.
    pub name: String,
    /// Working directory for every step (the repository root).
    pub root: PathBuf,
    /// Directory holding `<name>.list`.
    pub sprites_dir: PathBuf,
    /// Directory receiving the atlas and the extracted sprites.
    pub dist_dir: PathBuf,
    /// Program used to run the extraction script.
    pub interpreter: String,
    /// Sprite extraction script.
    pub extract_script: PathBuf,
    /// Sprite packer executable.
    pub packer: PathBuf,
    /// Image editor handed to the extraction script.
    pub image_editor: String,
}

impl Default for SpriteSetConfig {
    fn default() -> Self {
        Self {
            name: "the-planet".to_string(),
            root: PathBuf::from("."),
            sprites_dir: PathBuf::from("sprites"),
            dist_dir: PathBuf::from("dist/assets/sprites"),
            interpreter: "python3".to_string(),
            extract_script: PathBuf::from("sprites/extract-sprites.py"),
            packer: PathBuf::from("sprites/pack-sprites.exe"),
            image_editor: r"C:\Program Files\GIMP 2\bin\gimp-console-2.10.exe".to_string(),
        }
    }
}

impl SpriteSetConfig {
    /// Load a configuration from a JSON file. Missing keys keep their defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Config for a named sprite set under `root`, other values default.
    pub fn for_set(name: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            root: root.into(),
            ..Self::default()
        }
    }

    /// Reject names that would escape the sprite directories.
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(PipelineError::InvalidConfig(
                "sprite set name is empty".to_string(),
            ));
        }
        if self.name.contains(['/', '\\']) || self.name == "." || self.name == ".." {
            return Err(PipelineError::InvalidConfig(format!(
                "sprite set name {:?} must be a plain file name",
                self.name
            )));
        }
        Ok(())
    }

    /// Make `root` absolute against the current directory.
    ///
    /// Commands run with `root` as their working directory but receive
    /// `root`-prefixed paths, so a relative root would be applied twice.
    pub fn make_root_absolute(&mut self) -> Result<()> {
        if self.root.is_relative() {
            self.root = std::path::absolute(&self.root)?;
        }
        Ok(())
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }

    /// `<sprites_dir>/<name>.list`
    pub fn list_file(&self) -> PathBuf {
        self.resolve(&self.sprites_dir.join(format!("{}.list", self.name)))
    }

    /// Output directory for the atlas files.
    pub fn atlas_dir(&self) -> PathBuf {
        self.resolve(&self.dist_dir)
    }

    /// `<dist_dir>/<name>.png`
    pub fn atlas_image(&self) -> PathBuf {
        self.atlas_dir().join(format!("{}.png", self.name))
    }

    /// `<dist_dir>/<name>.atlas`
    pub fn atlas_file(&self) -> PathBuf {
        self.atlas_dir().join(format!("{}.atlas", self.name))
    }

    /// `<dist_dir>/<name>/`, where the extraction script writes sprites.
    pub fn extract_dir(&self) -> PathBuf {
        self.atlas_dir().join(&self.name)
    }

    pub fn extract_script_path(&self) -> PathBuf {
        self.resolve(&self.extract_script)
    }

    pub fn packer_path(&self) -> PathBuf {
        self.resolve(&self.packer)
    }
}
