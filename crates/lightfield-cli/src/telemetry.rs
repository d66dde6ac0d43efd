//! Logging setup for the command-line driver.

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "info,lightfield_world=debug";

/// Name of the log file for a run started now
pub fn log_file_name() -> String {
    format!("applog_{}.log", chrono::Local::now().format("%Y%m%d-%H%M%S"))
}

/// Install the global subscriber. Logs always go to stderr; when `log_dir`
/// is given they are also written to a timestamped file inside it, whose
/// path is returned.
pub fn init_telemetry(log_dir: Option<&Path>) -> Result<Option<PathBuf>> {
    let (file_layer, log_path) = match log_dir {
        Some(dir) => {
            fs::create_dir_all(dir)
                .with_context(|| format!("creating log directory {}", dir.display()))?;
            let path = dir.join(log_file_name());
            let file = File::create(&path)
                .with_context(|| format!("creating log file {}", path.display()))?;

            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_file(true)
                .with_line_number(true)
                .with_writer(Mutex::new(file));
            (Some(layer), Some(path))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_FILTER.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .with(file_layer)
        .init();

    match &log_path {
        Some(path) => info!("Logging to {}", path.display()),
        None => info!("File logging disabled (no log directory configured)"),
    }
    Ok(log_path)
}
