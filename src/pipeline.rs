//! One-shot pipeline orchestration.
//!
//! Fetch, render, composite, and install run strictly sequentially: the
//! content APIs are lightly authenticated and rate limited, so no two fetches
//! or render sessions ever overlap. Re-invocation by an external timer is the
//! intended refresh mechanism; there is no scheduler here.

use crate::render::{CardRenderer, CardSlot, RenderedCard};
use crate::source::ContentSource;
use crate::{combine, Error, Installer, PipelineConfig, Result};
use log::{info, warn};
use std::path::{Path, PathBuf};

/// Orchestrates one wallpaper generation run
pub struct Pipeline {
    config: PipelineConfig,
    source: ContentSource,
    renderer: CardRenderer,
}

impl Pipeline {
    /// Prepare the working directory and the content/render stages.
    pub fn new(config: PipelineConfig) -> Result<Self> {
        std::fs::create_dir_all(&config.work_dir)?;
        let source = ContentSource::new(config.source.clone())?;
        let renderer = CardRenderer::new(
            config.work_dir.clone(),
            config.viewport,
            config.settle_delay,
        );
        Ok(Self {
            config,
            source,
            renderer,
        })
    }

    /// Path the multi-monitor output is written to
    pub fn combined_path(&self) -> PathBuf {
        self.config.work_dir.join("combined_wallpaper.png")
    }

    /// Fetch a fresh background/verse pair and render one card for `slot`.
    ///
    /// The render session is synchronous Chrome work, so it runs on the
    /// blocking pool; fetches stay on the async task.
    async fn render_card(&self, slot: CardSlot) -> Result<RenderedCard> {
        let background = self.source.background().await;
        let verse = self.source.verse().await;

        let renderer = self.renderer.clone();
        tokio::task::spawn_blocking(move || renderer.render(&verse, &background, slot))
            .await
            .map_err(|e| Error::RenderError(format!("Render task panicked: {}", e)))?
    }

    /// Single-monitor run: one card at the full viewport, installed directly.
    pub async fn run_single(&self, installer: &dyn Installer) -> Result<PathBuf> {
        let card = self.render_card(CardSlot::Single).await?;
        self.install(installer, &card.image_path);
        tokio::time::sleep(self.config.exit_delay).await;
        Ok(card.image_path)
    }

    /// Multi-monitor run: one freshly paired card per profile, combined into
    /// a single spanning canvas, then installed.
    pub async fn run_multi(&self, installer: &dyn Installer) -> Result<PathBuf> {
        let mut cards = Vec::with_capacity(self.config.profiles.len());
        for profile in &self.config.profiles {
            let card = self.render_card(CardSlot::Monitor(profile.index)).await?;
            cards.push(card);
        }

        let output = self.combined_path();
        let combined = combine(&cards, &self.config.profiles, &output)?;

        self.install(installer, &combined.image_path);
        tokio::time::sleep(self.config.exit_delay).await;
        Ok(combined.image_path)
    }

    /// Hand the artifact to the OS. A refusal leaves the run successful: the
    /// generated image is still valid.
    fn install(&self, installer: &dyn Installer, image: &Path) {
        match installer.install(image, self.config.install_style) {
            Ok(()) => info!("Wallpaper installed: {}", image.display()),
            Err(e) => warn!("Failed to install wallpaper: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_creates_work_dir() {
        let dir = tempfile::tempdir().unwrap();
        let work_dir = dir.path().join("wallpapers");
        let config = PipelineConfig {
            work_dir: work_dir.clone(),
            ..Default::default()
        };
        let _pipeline = Pipeline::new(config).unwrap();
        assert!(work_dir.is_dir());
    }

    #[test]
    fn test_combined_path_is_stable() {
        let dir = tempfile::tempdir().unwrap();
        let config = PipelineConfig {
            work_dir: dir.path().to_path_buf(),
            ..Default::default()
        };
        let pipeline = Pipeline::new(config).unwrap();
        assert_eq!(
            pipeline.combined_path(),
            dir.path().join("combined_wallpaper.png")
        );
    }
}
