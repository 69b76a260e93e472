//! Error types for the wallpaper pipeline

use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while generating a wallpaper
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to prepare the working directory or configuration
    #[error("Pipeline initialization failed: {0}")]
    InitError(String),

    /// Failed to render a verse card
    #[error("Rendering failed: {0}")]
    RenderError(String),

    /// Failed to combine cards into the multi-monitor canvas
    #[error("Compositing failed: {0}")]
    CompositeError(String),

    /// The OS refused to install the wallpaper
    #[error("Wallpaper install failed: {0}")]
    InstallError(String),

    /// Network error (absorbed inside the content sources, never
    /// surfaced by the pipeline itself)
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Filesystem error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

// headless_chrome surfaces anyhow errors from launch/navigation/capture
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::RenderError(err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::NetworkError(err.to_string())
    }
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        Error::CompositeError(err.to_string())
    }
}
