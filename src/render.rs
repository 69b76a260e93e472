//! Card rendering: builds the verse-card HTML and captures it with headless
//! Chrome.
//!
//! Unlike the content sources, rendering has no cosmetic fallback: an
//! unrenderable card makes the run meaningless, so launch, navigation, and
//! capture failures all propagate as `Error::RenderError`.

use crate::source::{Background, Verse};
use crate::{Error, Result, Viewport};
use headless_chrome::protocol::cdp::Page;
use headless_chrome::{Browser, LaunchOptions};
use log::debug;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// A captured card on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedCard {
    pub image_path: PathBuf,
    pub width: u32,
    pub height: u32,
}

/// Which output slot a card belongs to; determines its file names
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardSlot {
    /// Single-monitor mode, fixed output name
    Single,
    /// One of the multi-monitor slots, keyed by profile index
    Monitor(usize),
}

impl CardSlot {
    fn card_filename(&self) -> String {
        match self {
            CardSlot::Single => "wallpaper_single.png".to_string(),
            CardSlot::Monitor(i) => format!("card_{}.png", i),
        }
    }

    fn markup_filename(&self) -> String {
        match self {
            CardSlot::Single => "temp_single.html".to_string(),
            CardSlot::Monitor(i) => format!("temp_{}.html", i),
        }
    }
}

/// Temporary markup document removed on every exit path
struct TempMarkup {
    path: PathBuf,
}

impl TempMarkup {
    fn write(path: PathBuf, contents: &str) -> Result<Self> {
        std::fs::write(&path, contents)?;
        Ok(Self { path })
    }

    fn file_url(&self) -> Result<String> {
        let absolute = self.path.canonicalize()?;
        Ok(format!("file://{}", absolute.display()))
    }
}

impl Drop for TempMarkup {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Build the card document: cover-fit background under a 50% black overlay,
/// centered column of four text blocks, largest to smallest.
pub fn card_markup(verse: &Verse, background: &Background) -> String {
    let chapter = verse.chapter.map(|c| c.to_string()).unwrap_or_default();
    let number = verse
        .verse_number
        .map(|n| n.to_string())
        .unwrap_or_default();

    format!(
        r#"<html>
<head>
    <style>
        body {{
            margin: 0;
            height: 100vh;
            display: flex;
            flex-direction: column;
            justify-content: center;
            align-items: center;
            background: linear-gradient(rgba(0,0,0,0.5), rgba(0,0,0,0.5)), url('{background}');
            background-size: 100% 100%;
            color: white;
            font-family: Arial, sans-serif;
            text-align: center;
            padding: 2rem;
            overflow: hidden;
        }}
        .arabic {{ font-size: 3rem; margin-bottom: 1rem; }}
        .transcription {{ font-size: 1.8rem; margin-bottom: 1rem; font-style: italic; }}
        .english {{ font-size: 1.5rem; margin-bottom: 1rem; }}
        .reference {{ font-size: 1rem; }}
    </style>
</head>
<body>
    <div class="arabic">{arabic}</div>
    <div class="transcription">{transcription}</div>
    <div class="english">{english}</div>
    <div class="reference">Surah {chapter}:{number}</div>
</body>
</html>"#,
        background = background.url,
        arabic = escape_html(&verse.original),
        transcription = escape_html(&verse.transliteration),
        english = escape_html(&verse.translation),
        chapter = chapter,
        number = number,
    )
}

/// Renders one verse card per call through a fresh headless Chrome session.
///
/// The session is function-scoped: the browser process is torn down when the
/// call returns, on the error paths included, and never pooled across calls.
#[derive(Debug, Clone)]
pub struct CardRenderer {
    work_dir: PathBuf,
    viewport: Viewport,
    settle_delay: Duration,
}

impl CardRenderer {
    pub fn new(work_dir: PathBuf, viewport: Viewport, settle_delay: Duration) -> Self {
        Self {
            work_dir,
            viewport,
            settle_delay,
        }
    }

    /// Path the card for `slot` will be written to
    pub fn card_path(&self, slot: CardSlot) -> PathBuf {
        self.work_dir.join(slot.card_filename())
    }

    /// Render one verse card and persist it at the slot's card path.
    ///
    /// Blocking: drives a synchronous Chrome session and sleeps through the
    /// settle delay. Callers on an async runtime should run this on the
    /// blocking pool.
    pub fn render(
        &self,
        verse: &Verse,
        background: &Background,
        slot: CardSlot,
    ) -> Result<RenderedCard> {
        let markup = card_markup(verse, background);
        // Guard removes the temp document when this function returns,
        // regardless of outcome
        let temp = TempMarkup::write(self.work_dir.join(slot.markup_filename()), &markup)?;

        let image_path = self.card_path(slot);
        let png = self.capture(&temp, &image_path)?;
        std::fs::write(&image_path, png)?;

        debug!("Wallpaper card generated: {}", image_path.display());
        Ok(RenderedCard {
            image_path,
            width: self.viewport.width,
            height: self.viewport.height,
        })
    }

    fn capture(&self, temp: &TempMarkup, image_path: &Path) -> Result<Vec<u8>> {
        let launch_options = LaunchOptions::default_builder()
            .headless(true)
            .sandbox(false)
            .window_size(Some((self.viewport.width, self.viewport.height)))
            .build()
            .map_err(|e| Error::RenderError(format!("Failed to build launch options: {}", e)))?;

        // Browser and tab are dropped on every exit path below, which
        // terminates the Chrome child process
        let browser = Browser::new(launch_options)
            .map_err(|e| Error::RenderError(format!("Failed to launch browser: {}", e)))?;

        let tab = browser
            .new_tab()
            .map_err(|e| Error::RenderError(format!("Failed to create tab: {}", e)))?;

        tab.navigate_to(&temp.file_url()?)
            .map_err(|e| Error::RenderError(format!("Navigation failed: {}", e)))?;

        tab.wait_until_navigated()
            .map_err(|e| Error::RenderError(format!("Wait for navigation failed: {}", e)))?;

        // Fixed settle wait for background image decode and font application;
        // there is no load-complete signal to poll
        std::thread::sleep(self.settle_delay);

        let png = tab
            .capture_screenshot(Page::CaptureScreenshotFormatOption::Png, None, None, true)
            .map_err(|e| {
                Error::RenderError(format!(
                    "Screenshot failed for {}: {}",
                    image_path.display(),
                    e
                ))
            })?;

        Ok(png)
    }
}
