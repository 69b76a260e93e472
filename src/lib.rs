//! versewall
//!
//! Generates a desktop wallpaper from a randomly sourced landscape photograph
//! and a randomly selected Quran verse. The verse card (original Arabic,
//! transliteration, translation, and reference) is rendered over the photo by
//! headless Chrome; in multi-monitor mode three cards are resized per monitor
//! profile and tiled into one combined canvas.
//!
//! # Example
//!
//! ```no_run
//! use versewall::{Pipeline, PipelineConfig};
//! use versewall::installer::NullInstaller;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = PipelineConfig::default();
//! let pipeline = Pipeline::new(config)?;
//! let wallpaper = pipeline.run_multi(&NullInstaller).await?;
//! println!("Wallpaper written to {}", wallpaper.display());
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;
use std::time::Duration;

pub mod error;
pub use error::{Error, Result};

pub mod composite;
pub mod installer;
pub mod pipeline;
pub mod render;
pub mod source;

pub use composite::{combine, CombinedWallpaper};
pub use installer::{default_installer, Installer, WallpaperStyle};
pub use pipeline::Pipeline;
pub use render::{card_markup, CardRenderer, CardSlot, RenderedCard};
pub use source::{Background, ContentSource, Verse};

/// Viewport dimensions for a rendered card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
        }
    }
}

/// Static per-monitor resize target.
///
/// Cards are always rendered at the full card viewport and stretched to this
/// size before compositing; each profile encodes its monitor's DPI-corrected
/// target resolution, chosen once per physical setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitorProfile {
    /// Slot position, left to right
    pub index: usize,
    pub target_width: u32,
    pub target_height: u32,
}

impl MonitorProfile {
    pub fn new(index: usize, target_width: u32, target_height: u32) -> Self {
        Self {
            index,
            target_width,
            target_height,
        }
    }
}

/// Endpoints and credentials for the two content providers
#[derive(Debug, Clone)]
pub struct SourceConfig {
    /// Random-photo endpoint, queried with `query` and `client_id` parameters
    pub photo_endpoint: String,
    /// Search tags sent to the photo endpoint
    pub photo_query: String,
    /// Photo API access credential
    pub photo_credential: String,
    /// Base URL of the scripture API (`/surah/<n>`, `/ayah/<id>/<edition>`)
    pub scripture_endpoint: String,
    /// Timeout applied to every HTTP request
    pub http_timeout: Duration,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            photo_endpoint: "https://api.unsplash.com/photos/random".to_string(),
            photo_query: "nature,landscape,mountains".to_string(),
            photo_credential: "oZQma7v_znVRCBBdlJt5jwPwuyt2O4DfYHL350hq_rA".to_string(),
            scripture_endpoint: "https://api.alquran.cloud/v1".to_string(),
            http_timeout: Duration::from_secs(10),
        }
    }
}

/// Configuration for a pipeline run
///
/// All knobs live here rather than in module-level constants so tests can
/// point the sources at fake endpoints and redirect artifacts into a
/// temporary directory.
///
/// # Examples
///
/// ```
/// let cfg = versewall::PipelineConfig::default();
/// assert_eq!(cfg.profiles.len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Directory holding generated cards, temp markup, and the final output
    pub work_dir: PathBuf,
    /// Card render resolution (before any per-monitor resize)
    pub viewport: Viewport,
    /// One profile per physical monitor slot, left to right
    pub profiles: Vec<MonitorProfile>,
    /// Content provider endpoints and credentials
    pub source: SourceConfig,
    /// Fixed wait between page load and screenshot, for background image
    /// decode and font application
    pub settle_delay: Duration,
    /// Trailing wait before the process exits, so out-of-process install
    /// side effects can finish
    pub exit_delay: Duration,
    /// Display style handed to the installer
    pub install_style: WallpaperStyle,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            work_dir: PathBuf::from("wallpapers"),
            viewport: Viewport::default(),
            profiles: vec![
                // Monitor 1 (1366x768 @ 125%)
                MonitorProfile::new(0, 1306, 968),
                // Monitor 2 (1920x1080 @ 125%)
                MonitorProfile::new(1, 1782, 964),
                // Monitor 3 (already scaled 1536x864)
                MonitorProfile::new(2, 1820, 1080),
            ],
            source: SourceConfig::default(),
            settle_delay: Duration::from_secs(2),
            exit_delay: Duration::from_secs(5),
            install_style: WallpaperStyle::Stretch,
        }
    }
}
