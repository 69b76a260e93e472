//! Desktop wallpaper installation adapters.
//!
//! The pipeline talks to a single `Installer` trait and never branches on
//! platform itself; platform selection happens once in `default_installer`.
//! Install failures are reported but non-fatal: the generated artifact is
//! still valid even when the OS refuses to apply it.

use crate::{Error, Result};
use log::info;
use std::path::Path;
use std::process::Command;

/// How the OS should map the image onto the desktop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallpaperStyle {
    Fill,
    Stretch,
    Tile,
    Fit,
    /// Span one image across all monitors; the mode the combined wallpaper
    /// is built for
    Span,
}

impl std::str::FromStr for WallpaperStyle {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fill" => Ok(WallpaperStyle::Fill),
            "stretch" => Ok(WallpaperStyle::Stretch),
            "tile" => Ok(WallpaperStyle::Tile),
            "fit" => Ok(WallpaperStyle::Fit),
            "span" => Ok(WallpaperStyle::Span),
            other => Err(format!(
                "Unknown wallpaper style '{}' (expected fill, stretch, tile, fit, or span)",
                other
            )),
        }
    }
}

impl WallpaperStyle {
    /// Windows `WallpaperStyle` registry value
    #[cfg_attr(not(windows), allow(dead_code))]
    fn registry_code(self) -> &'static str {
        match self {
            WallpaperStyle::Fill => "10",
            WallpaperStyle::Stretch => "2",
            WallpaperStyle::Tile => "0",
            WallpaperStyle::Fit => "6",
            WallpaperStyle::Span => "22",
        }
    }

    /// GNOME `picture-options` value
    #[cfg_attr(not(unix), allow(dead_code))]
    fn picture_options(self) -> &'static str {
        match self {
            WallpaperStyle::Fill => "zoom",
            WallpaperStyle::Stretch => "stretched",
            WallpaperStyle::Tile => "wallpaper",
            WallpaperStyle::Fit => "scaled",
            WallpaperStyle::Span => "spanned",
        }
    }
}

/// Installs a raster image as the desktop background
pub trait Installer: Send + Sync {
    fn install(&self, image: &Path, style: WallpaperStyle) -> Result<()>;
}

/// Logs the request and succeeds. Used by tests and `--no-install` runs.
pub struct NullInstaller;

impl Installer for NullInstaller {
    fn install(&self, image: &Path, style: WallpaperStyle) -> Result<()> {
        info!(
            "Install skipped: would set {} with style {:?}",
            image.display(),
            style
        );
        Ok(())
    }
}

fn run_checked(description: &str, command: &mut Command) -> Result<()> {
    let status = command
        .status()
        .map_err(|e| Error::InstallError(format!("{}: {}", description, e)))?;
    if !status.success() {
        return Err(Error::InstallError(format!(
            "{} exited with {}",
            description, status
        )));
    }
    Ok(())
}

/// Windows installer: style keys via the registry, then a system parameter
/// refresh, matching the classic WallpaperStyle/TileWallpaper sequence.
#[cfg(windows)]
pub struct WindowsInstaller;

#[cfg(windows)]
impl Installer for WindowsInstaller {
    fn install(&self, image: &Path, style: WallpaperStyle) -> Result<()> {
        let absolute = image.canonicalize()?;
        let tile = if style == WallpaperStyle::Tile { "1" } else { "0" };

        run_checked(
            "Setting WallpaperStyle registry value",
            Command::new("reg").args([
                "add",
                r"HKCU\Control Panel\Desktop",
                "/v",
                "WallpaperStyle",
                "/t",
                "REG_SZ",
                "/d",
                style.registry_code(),
                "/f",
            ]),
        )?;
        run_checked(
            "Setting TileWallpaper registry value",
            Command::new("reg").args([
                "add",
                r"HKCU\Control Panel\Desktop",
                "/v",
                "TileWallpaper",
                "/t",
                "REG_SZ",
                "/d",
                tile,
                "/f",
            ]),
        )?;

        // SPI_SETDESKWALLPAPER with SPIF_UPDATEINIFILE | SPIF_SENDCHANGE
        let script = format!(
            "Add-Type -TypeDefinition 'using System.Runtime.InteropServices; \
             public class Wp {{ [DllImport(\"user32.dll\")] public static extern int \
             SystemParametersInfo(int a, int b, string c, int d); }}'; \
             [Wp]::SystemParametersInfo(20, 0, '{}', 3)",
            absolute.display()
        );
        run_checked(
            "Applying wallpaper",
            Command::new("powershell").args(["-NoProfile", "-Command", &script]),
        )?;

        info!("Wallpaper set: {}", absolute.display());
        Ok(())
    }
}

/// GNOME installer via gsettings
#[cfg(unix)]
pub struct GnomeInstaller;

#[cfg(unix)]
impl Installer for GnomeInstaller {
    fn install(&self, image: &Path, style: WallpaperStyle) -> Result<()> {
        let absolute = image.canonicalize()?;
        let uri = format!("file://{}", absolute.display());

        for key in ["picture-uri", "picture-uri-dark"] {
            run_checked(
                "Setting background image",
                Command::new("gsettings").args([
                    "set",
                    "org.gnome.desktop.background",
                    key,
                    &uri,
                ]),
            )?;
        }
        run_checked(
            "Setting background style",
            Command::new("gsettings").args([
                "set",
                "org.gnome.desktop.background",
                "picture-options",
                style.picture_options(),
            ]),
        )?;

        info!("Wallpaper set: {}", absolute.display());
        Ok(())
    }
}

/// Installer for the current platform
#[cfg(windows)]
pub fn default_installer() -> Box<dyn Installer> {
    Box::new(WindowsInstaller)
}

#[cfg(unix)]
pub fn default_installer() -> Box<dyn Installer> {
    Box::new(GnomeInstaller)
}

#[cfg(not(any(windows, unix)))]
pub fn default_installer() -> Box<dyn Installer> {
    Box::new(NullInstaller)
}
