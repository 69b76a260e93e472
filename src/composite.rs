//! Multi-monitor compositing: stretch each card to its monitor profile and
//! tile the results left-to-right on one black canvas.

use crate::render::RenderedCard;
use crate::{Error, MonitorProfile, Result};
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use log::debug;
use std::path::{Path, PathBuf};

/// The canvas never ends up shorter than this, whatever the profiles say
const MIN_CANVAS_HEIGHT: u32 = 1080;

/// The combined multi-monitor wallpaper on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombinedWallpaper {
    pub image_path: PathBuf,
    pub width: u32,
    pub height: u32,
}

/// Combine the rendered cards into one wallpaper spanning all profiles.
///
/// Each card is stretched to its profile's target size without preserving
/// aspect ratio: the profiles already encode the DPI-corrected size for their
/// monitor, and the distortion is an accepted tradeoff. Cards are pasted in
/// profile order at cumulative x-offsets, top-aligned.
///
/// Any failure here (missing card file, decode or encode error) is fatal to
/// the run; no partial composite is produced.
pub fn combine(
    cards: &[RenderedCard],
    profiles: &[MonitorProfile],
    output_path: &Path,
) -> Result<CombinedWallpaper> {
    if cards.len() != profiles.len() {
        return Err(Error::CompositeError(format!(
            "Expected {} cards for {} monitor profiles, got {}",
            profiles.len(),
            profiles.len(),
            cards.len()
        )));
    }
    if cards.is_empty() {
        return Err(Error::CompositeError("No cards to combine".to_string()));
    }

    let mut resized = Vec::with_capacity(cards.len());
    for (card, profile) in cards.iter().zip(profiles) {
        let img = image::open(&card.image_path).map_err(|e| {
            Error::CompositeError(format!(
                "Failed to open card {}: {}",
                card.image_path.display(),
                e
            ))
        })?;
        resized.push(img.resize_exact(
            profile.target_width,
            profile.target_height,
            FilterType::Triangle,
        ));
    }

    let total_width: u32 = resized.iter().map(|img| img.width()).sum();
    let max_height = resized
        .iter()
        .map(|img| img.height())
        .max()
        .unwrap_or(MIN_CANVAS_HEIGHT)
        .max(MIN_CANVAS_HEIGHT);

    let mut canvas = RgbaImage::from_pixel(total_width, max_height, Rgba([0, 0, 0, 255]));

    let mut x_offset: i64 = 0;
    for img in &resized {
        imageops::overlay(&mut canvas, img, x_offset, 0);
        x_offset += i64::from(img.width());
    }

    canvas.save(output_path).map_err(|e| {
        Error::CompositeError(format!(
            "Failed to save combined wallpaper {}: {}",
            output_path.display(),
            e
        ))
    })?;

    debug!("Combined wallpaper created: {}", output_path.display());
    Ok(CombinedWallpaper {
        image_path: output_path.to_path_buf(),
        width: total_width,
        height: max_height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Write a solid-colored PNG and return its card descriptor
    fn solid_card(dir: &Path, name: &str, w: u32, h: u32, color: [u8; 4]) -> RenderedCard {
        let path = dir.join(name);
        let img = RgbaImage::from_pixel(w, h, Rgba(color));
        img.save(&path).unwrap();
        RenderedCard {
            image_path: path,
            width: w,
            height: h,
        }
    }

    #[test]
    fn test_combine_geometry_and_offsets() {
        let dir = tempfile::tempdir().unwrap();
        let cards = vec![
            solid_card(dir.path(), "card_0.png", 1920, 1080, [255, 0, 0, 255]),
            solid_card(dir.path(), "card_1.png", 1920, 1080, [0, 255, 0, 255]),
            solid_card(dir.path(), "card_2.png", 1920, 1080, [0, 0, 255, 255]),
        ];
        let profiles = vec![
            MonitorProfile::new(0, 1306, 968),
            MonitorProfile::new(1, 1782, 964),
            MonitorProfile::new(2, 1820, 1080),
        ];
        let out = dir.path().join("combined_wallpaper.png");

        let combined = combine(&cards, &profiles, &out).unwrap();
        assert_eq!(combined.width, 1306 + 1782 + 1820);
        assert_eq!(combined.height, 1080);

        let canvas = image::open(&out).unwrap().to_rgba8();
        assert_eq!(canvas.dimensions(), (4908, 1080));
        // Cards landed at cumulative offsets, resized not native
        assert_eq!(canvas.get_pixel(0, 0), &Rgba([255, 0, 0, 255]));
        assert_eq!(canvas.get_pixel(1306, 0), &Rgba([0, 255, 0, 255]));
        assert_eq!(canvas.get_pixel(3088, 0), &Rgba([0, 0, 255, 255]));
        // Below card 0's 968px stretch the canvas stays black
        assert_eq!(canvas.get_pixel(0, 1000), &Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_resize_applied_before_paste() {
        let dir = tempfile::tempdir().unwrap();
        // Native size much smaller than the profile target
        let cards = vec![solid_card(dir.path(), "tiny.png", 10, 10, [200, 10, 10, 255])];
        let profiles = vec![MonitorProfile::new(0, 500, 400)];
        let out = dir.path().join("combined.png");

        let combined = combine(&cards, &profiles, &out).unwrap();
        assert_eq!(combined.width, 500);

        let canvas = image::open(&out).unwrap().to_rgba8();
        // Pasted region matches the target, not the native, dimensions
        assert_eq!(canvas.get_pixel(499, 399), &Rgba([200, 10, 10, 255]));
    }

    #[test]
    fn test_min_canvas_height_clamp() {
        let dir = tempfile::tempdir().unwrap();
        let cards = vec![solid_card(dir.path(), "short.png", 100, 100, [1, 2, 3, 255])];
        let profiles = vec![MonitorProfile::new(0, 200, 150)];
        let out = dir.path().join("combined.png");

        let combined = combine(&cards, &profiles, &out).unwrap();
        assert_eq!(combined.height, MIN_CANVAS_HEIGHT);
    }

    #[test]
    fn test_card_profile_count_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let cards = vec![solid_card(dir.path(), "one.png", 10, 10, [0, 0, 0, 255])];
        let profiles = vec![
            MonitorProfile::new(0, 100, 100),
            MonitorProfile::new(1, 100, 100),
        ];
        let out = dir.path().join("combined.png");

        let result = combine(&cards, &profiles, &out);
        assert!(matches!(result, Err(Error::CompositeError(_))));
        assert!(!out.exists());
    }

    #[test]
    fn test_missing_card_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let cards = vec![RenderedCard {
            image_path: dir.path().join("does_not_exist.png"),
            width: 1920,
            height: 1080,
        }];
        let profiles = vec![MonitorProfile::new(0, 100, 100)];
        let out = dir.path().join("combined.png");

        let result = combine(&cards, &profiles, &out);
        assert!(matches!(result, Err(Error::CompositeError(_))));
        assert!(!out.exists());
    }
}
