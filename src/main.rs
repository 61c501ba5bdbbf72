//! Pixel Lab CLI
//!
//! Interactive menu for loading or capturing an image and applying a
//! single transform to it.

use clap::Parser;
use pixel_lab::{
    acquisition::{Camera, FileConfig, MockCamera},
    FilePresenter, Presenter, Shell,
};
use std::io;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(name = "pixel-lab", version, about = "Interactive BGR image editor")]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory receiving displayed images (overrides the config file).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Camera device index (overrides the config file).
    #[arg(short, long)]
    device: Option<u32>,

    /// Use synthetic frames instead of a physical camera.
    #[arg(long)]
    mock_camera: bool,

    /// Write displayed images to the output directory instead of opening windows.
    #[arg(long)]
    no_window: bool,
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    info!("Pixel Lab v{}", pixel_lab::VERSION);

    let mut config = match &cli.config {
        Some(path) => match FileConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load config {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => FileConfig::default(),
    };
    if let Some(dir) = cli.output_dir {
        config.output.directory = dir;
    }
    if let Some(device) = cli.device {
        config.capture.device_id = device;
    }

    // First Ctrl-C ends the session at the next prompt, a second one exits
    let shutdown = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&shutdown);
    if let Err(e) = ctrlc::set_handler(move || {
        if flag.swap(true, Ordering::SeqCst) {
            std::process::exit(130);
        }
        eprintln!("\nInterrupted, finishing at the next prompt (Ctrl-C again to quit)");
    }) {
        warn!("Failed to install Ctrl-C handler: {}", e);
    }

    let presenter = select_presenter(cli.no_window, config.output.directory.clone());
    let camera = select_camera(cli.mock_camera);

    let stdin = io::stdin();
    let mut shell = Shell::new(stdin.lock(), io::stdout(), presenter, camera)
        .with_capture_config(config.capture)
        .with_border(config.sharpen.border)
        .with_shutdown(shutdown);

    if let Err(e) = shell.run() {
        eprintln!("Terminal I/O failed: {}", e);
        std::process::exit(1);
    }

    info!("Session ended");
}

#[cfg(feature = "window")]
fn select_presenter(no_window: bool, directory: PathBuf) -> Box<dyn Presenter> {
    if no_window {
        Box::new(file_presenter(directory))
    } else {
        Box::new(pixel_lab::presentation::WindowPresenter::new())
    }
}

#[cfg(not(feature = "window"))]
fn select_presenter(no_window: bool, directory: PathBuf) -> Box<dyn Presenter> {
    if !no_window {
        warn!("Built without the `window` feature; displayed images are saved instead");
    }
    Box::new(file_presenter(directory))
}

fn file_presenter(directory: PathBuf) -> FilePresenter {
    info!(
        directory = %directory.display(),
        "Displayed images are written to the output directory"
    );
    FilePresenter::new(directory)
}

#[cfg(feature = "camera")]
fn select_camera(mock: bool) -> Box<dyn Camera> {
    if mock {
        Box::new(MockCamera::new())
    } else {
        Box::new(pixel_lab::acquisition::DeviceCamera::new())
    }
}

#[cfg(not(feature = "camera"))]
fn select_camera(mock: bool) -> Box<dyn Camera> {
    if !mock {
        warn!("Built without the `camera` feature; snapshots use synthetic frames");
    }
    Box::new(MockCamera::new())
}
