//! Error types for the asset pipeline.

use thiserror::Error;

/// Result type alias using PipelineError.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Main error type for texture cleaning and sprite rebuilding.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Failed to decode or encode an image.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse JSON configuration.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Texture data is malformed or in a pixel format we cannot rewrite.
    #[error("Invalid texture: {0}")]
    InvalidTexture(String),

    /// An external program could not be started.
    #[error("Failed to run {program}: {source}")]
    CommandSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// An external program exited with a non-zero status.
    #[error("{program} exited with {}: {stderr}", describe_code(.code))]
    CommandFailed {
        program: String,
        code: Option<i32>,
        stderr: String,
    },

    /// Configuration values are unusable.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {}", code),
        None => "no status (terminated by signal)".to_string(),
    }
}
