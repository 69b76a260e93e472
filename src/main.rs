use clap::{Parser, ValueEnum};
use log::{error, info};
use std::path::PathBuf;
use versewall::installer::NullInstaller;
use versewall::{default_installer, Installer, Pipeline, PipelineConfig, WallpaperStyle};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// One 1920x1080 card for a single monitor
    Single,
    /// Three cards tiled into one canvas spanning three monitors
    Multi,
}

/// Generate a verse wallpaper and set it as the desktop background
#[derive(Parser, Debug)]
#[command(name = "versewall", version, about)]
struct Cli {
    /// Generation mode
    #[arg(long, value_enum, default_value_t = Mode::Multi)]
    mode: Mode,

    /// Working directory for cards, temp markup, and the final image
    #[arg(long, default_value = "wallpapers")]
    dir: PathBuf,

    /// Display style handed to the OS installer
    #[arg(long, default_value = "stretch")]
    style: WallpaperStyle,

    /// Generate the wallpaper but skip the OS install step
    #[arg(long)]
    no_install: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let _logger = flexi_logger::Logger::try_with_env_or_str("info")
        .and_then(|logger| logger.start())
        .unwrap_or_else(|e| {
            eprintln!("Failed to initialize logging: {}", e);
            std::process::exit(1);
        });

    let config = PipelineConfig {
        work_dir: cli.dir,
        install_style: cli.style,
        ..Default::default()
    };

    let installer: Box<dyn Installer> = if cli.no_install {
        Box::new(NullInstaller)
    } else {
        default_installer()
    };

    let pipeline = match Pipeline::new(config) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    let result = match cli.mode {
        Mode::Single => pipeline.run_single(installer.as_ref()).await,
        Mode::Multi => pipeline.run_multi(installer.as_ref()).await,
    };

    match result {
        Ok(path) => info!("Wallpaper run complete: {}", path.display()),
        Err(e) => {
            // Render and composite failures are fatal; sources and the
            // installer degrade gracefully before reaching here
            error!("{}", e);
            std::process::exit(1);
        }
    }
}
