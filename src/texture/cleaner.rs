//! Destructive clean-up of every PNG under a directory.

use super::bleed::{bleed_transparent, BleedStats};
use super::TextureData;
use crate::error::Result;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Texture cleaner configuration.
#[derive(Debug, Clone, Default)]
pub struct CleanerConfig {
    /// Compute results without writing any file back.
    pub dry_run: bool,
}

/// What happened to one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    /// File name does not end in `.png`.
    NotPng,
    /// PNG that is not 8-bit RGBA (no alpha channel, or grayscale/16-bit alpha).
    NoAlpha,
    /// PNG processed (and rewritten unless running dry).
    Cleaned(BleedStats),
}

/// Totals for a directory walk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanReport {
    pub processed: usize,
    pub skipped_not_png: usize,
    pub skipped_no_alpha: usize,
    pub pixels_filled: usize,
    pub pixels_unresolved: usize,
}

impl CleanReport {
    fn record(&mut self, outcome: FileOutcome) {
        match outcome {
            FileOutcome::NotPng => self.skipped_not_png += 1,
            FileOutcome::NoAlpha => self.skipped_no_alpha += 1,
            FileOutcome::Cleaned(stats) => {
                self.processed += 1;
                self.pixels_filled += stats.filled;
                self.pixels_unresolved += stats.unresolved;
            }
        }
    }
}

/// Rewrites transparent pixel colors in place.
#[derive(Debug, Clone, Default)]
pub struct TextureCleaner {
    config: CleanerConfig,
}

impl TextureCleaner {
    pub fn new(config: CleanerConfig) -> Self {
        Self { config }
    }

    /// Clean every file below `dir`, recursing into subdirectories.
    ///
    /// The first error aborts the walk; files already rewritten stay
    /// rewritten.
    pub fn clean_directory<P: AsRef<Path>>(&self, dir: P) -> Result<CleanReport> {
        let dir = dir.as_ref();
        if !dir.exists() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} does not exist", dir.display()),
            )
            .into());
        }
        if !dir.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} is not a directory", dir.display()),
            )
            .into());
        }

        let mut report = CleanReport::default();
        let mut files = Vec::new();
        collect_files_recursive(dir, &mut files)?;

        for path in files {
            let outcome = self.clean_file(&path)?;
            report.record(outcome);
        }

        Ok(report)
    }

    /// Clean a single file.
    pub fn clean_file<P: AsRef<Path>>(&self, path: P) -> Result<FileOutcome> {
        let path = path.as_ref();
        if !is_png_path(path) {
            info!("{} is not a png, ignoring", path.display());
            return Ok(FileOutcome::NotPng);
        }

        info!("Processing {}", path.display());
        let data = std::fs::read(path)?;
        let Some(texture) = TextureData::from_png_bytes(&data)? else {
            info!("No RGBA alpha channel present in {}, skipping", path.display());
            return Ok(FileOutcome::NoAlpha);
        };

        let (cleaned, stats) = bleed_transparent(&texture);
        debug!(
            "{}: {} transparent, {} filled, {} without donor",
            path.display(),
            stats.transparent,
            stats.filled,
            stats.unresolved
        );

        if !self.config.dry_run {
            std::fs::write(path, cleaned.to_png_bytes()?)?;
        }

        Ok(FileOutcome::Cleaned(stats))
    }
}

/// Case-insensitive `.png` suffix check on the file name.
fn is_png_path(path: &Path) -> bool {
    path.extension()
        .map(|e| e.eq_ignore_ascii_case("png"))
        .unwrap_or(false)
}

/// Collect regular files recursively, sorted by path within each directory.
///
/// Symlinks are never followed, to files or to directories.
fn collect_files_recursive(dir: &Path, out: &mut Vec<PathBuf>) -> Result<()> {
    let mut entries = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        entries.push((entry.path(), entry.file_type()?));
    }
    entries.sort_by(|a, b| a.0.cmp(&b.0));

    for (path, file_type) in entries {
        if file_type.is_symlink() {
            debug!("{} is a symlink, not following", path.display());
        } else if file_type.is_dir() {
            collect_files_recursive(&path, out)?;
        } else {
            out.push(path);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_png_path() {
        assert!(is_png_path(Path::new("a/b/tile.png")));
        assert!(is_png_path(Path::new("TILE.PNG")));
        assert!(is_png_path(Path::new("tile.Png")));
        assert!(!is_png_path(Path::new("tile.png.bak")));
        assert!(!is_png_path(Path::new("png")));
        assert!(!is_png_path(Path::new("tile.jpg")));
    }

    #[test]
    fn test_report_record() {
        let mut report = CleanReport::default();
        report.record(FileOutcome::NotPng);
        report.record(FileOutcome::NoAlpha);
        report.record(FileOutcome::Cleaned(BleedStats {
            transparent: 4,
            filled: 3,
            unresolved: 1,
        }));

        assert_eq!(
            report,
            CleanReport {
                processed: 1,
                skipped_not_png: 1,
                skipped_no_alpha: 1,
                pixels_filled: 3,
                pixels_unresolved: 1,
            }
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_walk_skips_symlinks() {
        let dir = tempfile::tempdir().unwrap();
        let tree = dir.path().join("tree");
        std::fs::create_dir_all(tree.join("sub")).unwrap();
        std::fs::write(tree.join("a.png"), b"").unwrap();
        std::fs::write(tree.join("sub").join("b.png"), b"").unwrap();
        std::fs::write(dir.path().join("outside.png"), b"").unwrap();
        std::os::unix::fs::symlink(&tree, tree.join("loop")).unwrap();
        std::os::unix::fs::symlink(dir.path().join("outside.png"), tree.join("link.png")).unwrap();

        let mut files = Vec::new();
        collect_files_recursive(&tree, &mut files).unwrap();
        assert_eq!(files, vec![tree.join("a.png"), tree.join("sub").join("b.png")]);
    }

    #[test]
    fn test_missing_directory_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let err = TextureCleaner::default().clean_directory(&missing).unwrap_err();
        assert!(matches!(err, crate::PipelineError::Io(ref e) if e.kind() == io::ErrorKind::NotFound));
    }
}
