use std::fs::{self, OpenOptions};
use std::path::PathBuf;

use log::LevelFilter;
use simplelog::{ConfigBuilder, WriteLogger};

use crate::config::{self, LogSettings};

/// Where log records go: the configured path, else the XDG state dir.
pub fn resolve_log_path(settings: &LogSettings) -> Option<PathBuf> {
    settings
        .path
        .as_ref()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from)
        .or_else(config::default_log_path)
}

/// Install the file logger. The terminal belongs to the UI, so nothing is
/// logged to stderr. Returns the log file path, or `None` when logging is off.
pub fn init_logging(settings: &LogSettings) -> Result<Option<PathBuf>, Box<dyn std::error::Error>> {
    let level: LevelFilter = settings.level.into();
    if level == LevelFilter::Off {
        return Ok(None);
    }
    let Some(path) = resolve_log_path(settings) else {
        return Ok(None);
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .add_filter_ignore_str("zbus")
        .build();
    WriteLogger::init(level, log_config, file)?;

    Ok(Some(path))
}
