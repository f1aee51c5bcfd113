//! Asset Pipeline CLI
//!
//! Clean transparent texture pixels and rebuild sprite atlases.

use asset_pipeline::{clean_textures, rebuild_sprites, CleanerConfig, SpriteSetConfig};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "asset-pipeline")]
#[command(author, version, about = "Texture and sprite atlas tools for the game asset build", long_about = None)]
struct Cli {
    /// Log debug output (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Copy the nearest opaque color into fully transparent pixels of every
    /// PNG under a directory, overwriting the files
    CleanTextures {
        /// Texture directory (e.g. ./dist/assets/textures/)
        dir: PathBuf,

        /// Report what would change without writing files
        #[arg(long)]
        dry_run: bool,
    },

    /// Delete old outputs, extract sprites and pack them into an atlas
    RebuildSprites {
        /// JSON file with sprite set settings
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Sprite set name (shared by the .xcf and .list files)
        #[arg(short, long)]
        name: Option<String>,

        /// Repository root to run from
        #[arg(long)]
        root: Option<PathBuf>,

        /// Image editor executable passed to the extraction script
        #[arg(long)]
        image_editor: Option<String>,

        /// Interpreter for the extraction script
        #[arg(long)]
        interpreter: Option<String>,

        /// Sprite extraction script
        #[arg(long)]
        extract_script: Option<PathBuf>,

        /// Sprite packer executable
        #[arg(long)]
        packer: Option<PathBuf>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // Usage errors exit with 1; --help and --version are not errors.
            err.print()?;
            std::process::exit(if err.use_stderr() { 1 } else { 0 });
        }
    };

    init_logging(cli.verbose);

    match cli.command {
        Commands::CleanTextures { dir, dry_run } => {
            run_clean(dir, dry_run)?;
        }
        Commands::RebuildSprites {
            config,
            name,
            root,
            image_editor,
            interpreter,
            extract_script,
            packer,
        } => {
            let mut sprite_config = match config {
                Some(path) => SpriteSetConfig::from_json_file(path)?,
                None => SpriteSetConfig::default(),
            };
            if let Some(name) = name {
                sprite_config.name = name;
            }
            if let Some(root) = root {
                sprite_config.root = root;
            }
            if let Some(image_editor) = image_editor {
                sprite_config.image_editor = image_editor;
            }
            if let Some(interpreter) = interpreter {
                sprite_config.interpreter = interpreter;
            }
            if let Some(extract_script) = extract_script {
                sprite_config.extract_script = extract_script;
            }
            if let Some(packer) = packer {
                sprite_config.packer = packer;
            }
            run_rebuild(sprite_config)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run_clean(dir: PathBuf, dry_run: bool) -> Result<(), Box<dyn std::error::Error>> {
    let report = clean_textures(&dir, CleanerConfig { dry_run })?;

    println!(
        "{} {} textures in {:?}",
        if dry_run { "Checked" } else { "Cleaned" },
        report.processed,
        dir
    );
    println!("  - Pixels recolored: {}", report.pixels_filled);
    if report.pixels_unresolved > 0 {
        println!("  - Pixels without a donor: {}", report.pixels_unresolved);
    }
    println!("  - Skipped (not png): {}", report.skipped_not_png);
    println!("  - Skipped (no alpha): {}", report.skipped_no_alpha);

    Ok(())
}

fn run_rebuild(config: SpriteSetConfig) -> Result<(), Box<dyn std::error::Error>> {
    let name = config.name.clone();
    let atlas = config.atlas_image();
    let report = rebuild_sprites(config)?;

    println!(
        "Packed {} sprites for '{}' into {:?}",
        report.sprites.len(),
        name,
        atlas
    );

    Ok(())
}
