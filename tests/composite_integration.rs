//! End-to-end compositor tests over synthesized card images.

use image::{Rgba, RgbaImage};
use std::path::Path;
use versewall::{combine, MonitorProfile, RenderedCard};

fn write_card(dir: &Path, name: &str, color: [u8; 4]) -> RenderedCard {
    let path = dir.join(name);
    // Native card resolution, before any per-monitor resize
    let img = RgbaImage::from_pixel(1920, 1080, Rgba(color));
    img.save(&path).unwrap();
    RenderedCard {
        image_path: path,
        width: 1920,
        height: 1080,
    }
}

fn default_profiles() -> Vec<MonitorProfile> {
    vec![
        MonitorProfile::new(0, 1306, 968),
        MonitorProfile::new(1, 1782, 964),
        MonitorProfile::new(2, 1820, 1080),
    ]
}

#[test]
fn combine_three_cards_into_spanning_canvas() {
    let dir = tempfile::tempdir().unwrap();
    let cards = vec![
        write_card(dir.path(), "card_0.png", [255, 0, 0, 255]),
        write_card(dir.path(), "card_1.png", [0, 255, 0, 255]),
        write_card(dir.path(), "card_2.png", [0, 0, 255, 255]),
    ];
    let out = dir.path().join("combined_wallpaper.png");

    let combined = combine(&cards, &default_profiles(), &out).unwrap();
    assert_eq!(combined.image_path, out);
    assert_eq!(combined.width, 4908);
    assert_eq!(combined.height, 1080);

    let canvas = image::open(&out).unwrap().to_rgba8();
    assert_eq!(canvas.dimensions(), (4908, 1080));

    // Sample the middle of each monitor region
    assert_eq!(canvas.get_pixel(650, 480), &Rgba([255, 0, 0, 255]));
    assert_eq!(canvas.get_pixel(1306 + 890, 480), &Rgba([0, 255, 0, 255]));
    assert_eq!(canvas.get_pixel(3088 + 900, 480), &Rgba([0, 0, 255, 255]));

    // Shorter monitors leave black canvas beneath them
    assert_eq!(canvas.get_pixel(650, 1079), &Rgba([0, 0, 0, 255]));
    assert_eq!(canvas.get_pixel(1306 + 890, 1079), &Rgba([0, 0, 0, 255]));
}

#[test]
fn combine_overwrites_previous_output() {
    let dir = tempfile::tempdir().unwrap();
    let cards = vec![
        write_card(dir.path(), "card_0.png", [9, 9, 9, 255]),
        write_card(dir.path(), "card_1.png", [9, 9, 9, 255]),
        write_card(dir.path(), "card_2.png", [9, 9, 9, 255]),
    ];
    let out = dir.path().join("combined_wallpaper.png");
    std::fs::write(&out, b"stale bytes from a previous run").unwrap();

    let combined = combine(&cards, &default_profiles(), &out).unwrap();
    assert_eq!(combined.width, 4908);
    assert!(image::open(&out).is_ok());
}

#[test]
fn combine_with_missing_card_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mut cards = vec![
        write_card(dir.path(), "card_0.png", [1, 1, 1, 255]),
        write_card(dir.path(), "card_1.png", [1, 1, 1, 255]),
    ];
    cards.push(RenderedCard {
        image_path: dir.path().join("card_2.png"),
        width: 1920,
        height: 1080,
    });
    let out = dir.path().join("combined_wallpaper.png");

    assert!(combine(&cards, &default_profiles(), &out).is_err());
    assert!(!out.exists());
}
