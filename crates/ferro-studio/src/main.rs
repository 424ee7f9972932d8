use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use ferro_engine::coords::SurfaceSize;
use ferro_engine::field::{self, DVec2};
use ferro_engine::logging::{init_logging, LoggingConfig};
use ferro_engine::window::{Runtime, RuntimeConfig};
use ferro_engine::FerrofluidApp;

/// Animated ferrofluid noise field that follows the mouse.
#[derive(Debug, Parser)]
#[command(name = "ferrofluid", version, about)]
struct Cli {
    /// Open a 1280x720 window instead of going full-screen.
    #[arg(long)]
    windowed: bool,

    /// Render one frame on the CPU to this PNG file and exit.
    #[arg(long, value_name = "PATH")]
    snapshot: Option<PathBuf>,

    /// Snapshot width in pixels (at most 16384).
    #[arg(long, default_value_t = 800, requires = "snapshot")]
    width: u32,

    /// Snapshot height in pixels (at most 16384).
    #[arg(long, default_value_t = 600, requires = "snapshot")]
    height: u32,

    /// Snapshot time in seconds.
    #[arg(long, default_value_t = 0.0, requires = "snapshot")]
    time: f64,

    /// Snapshot pointer x in normalized device coordinates.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true, requires = "snapshot")]
    mouse_x: f64,

    /// Snapshot pointer y in normalized device coordinates.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true, requires = "snapshot")]
    mouse_y: f64,

    /// Log filter (env_logger syntax); overrides RUST_LOG.
    #[arg(long, value_name = "FILTER")]
    log: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(LoggingConfig {
        env_filter: cli.log.clone(),
        ..LoggingConfig::default()
    });

    match &cli.snapshot {
        Some(path) => write_snapshot(&cli, path),
        None => run_window(&cli),
    }
}

fn run_window(cli: &Cli) -> Result<()> {
    let config = RuntimeConfig {
        fullscreen: !cli.windowed,
        ..RuntimeConfig::default()
    };

    log::info!("starting ferrofluid ({})", if config.fullscreen { "fullscreen" } else { "windowed" });
    Runtime::run(config, FerrofluidApp::gpu_init(), FerrofluidApp::new())
}

fn write_snapshot(cli: &Cli, path: &Path) -> Result<()> {
    let size = SurfaceSize::new(cli.width, cli.height);
    let mouse = DVec2::new(cli.mouse_x.clamp(-1.0, 1.0), cli.mouse_y.clamp(-1.0, 1.0));

    let pixels = field::render_rgba8(size, cli.time, mouse).context("failed to render snapshot")?;
    let image = image::RgbaImage::from_raw(size.width, size.height, pixels)
        .context("snapshot buffer does not match its dimensions")?;

    image
        .save(path)
        .with_context(|| format!("failed to write {}", path.display()))?;

    log::info!(
        "wrote {}x{} snapshot (aspect {:.3}) to {}",
        size.width,
        size.height,
        size.aspect(),
        path.display()
    );
    Ok(())
}
