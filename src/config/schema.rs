use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/tunepeek/config.toml` or `~/.config/tunepeek/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `TUNEPEEK__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub search: SearchSettings,
    pub audio: AudioSettings,
    pub ui: UiSettings,
    pub links: LinkSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Search endpoint; the query string is appended to it.
    pub endpoint: String,
    /// Maximum number of results requested per search.
    pub limit: u32,
    /// Term searched on startup when none is given on the command line.
    pub default_term: String,
    /// `User-Agent` header sent with search and preview requests.
    pub user_agent: String,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            endpoint: "https://itunes.apple.com/search".to_string(),
            limit: 52,
            default_term: "Daft Punk".to_string(),
            user_agent: concat!("tunepeek/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Crossfade duration when switching previews (milliseconds).
    /// Set to 0 to disable crossfade.
    pub crossfade_ms: u64,
    /// Number of steps used to fade volumes (higher = smoother, more CPU).
    pub crossfade_steps: u64,
    /// Fade-out duration when quitting (milliseconds).
    /// Set to 0 to stop immediately.
    pub quit_fade_out_ms: u64,
    /// Output volume, 0.0 to 1.0.
    pub volume: f32,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            crossfade_ms: 250,
            crossfade_steps: 10,
            quit_fade_out_ms: 500,
            volume: 1.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box, next to the search input.
    pub header_text: String,
    /// Width of one result card in columns.
    pub card_width: u16,
    /// Height of one result card in rows.
    pub card_height: u16,
    /// Edge length requested for artwork, replacing the API's `100x100bb`.
    pub artwork_resolution: u32,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ tunepeek ~ ".to_string(),
            card_width: 28,
            card_height: 7,
            artwork_resolution: 400,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LinkSettings {
    /// Command used to open outbound links. When unset, the first of
    /// `xdg-open`, `open` and `wslview` found on `PATH` is used.
    pub open_command: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Minimum level written to the log file.
    pub level: LogLevelSetting,
    /// Log file path. Defaults to `$XDG_STATE_HOME/tunepeek/tunepeek.log`.
    pub path: Option<String>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: LogLevelSetting::Info,
            path: None,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LogLevelSetting {
    #[serde(alias = "none")]
    Off,
    Error,
    #[serde(alias = "warning")]
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevelSetting> for log::LevelFilter {
    fn from(level: LogLevelSetting) -> Self {
        match level {
            LogLevelSetting::Off => log::LevelFilter::Off,
            LogLevelSetting::Error => log::LevelFilter::Error,
            LogLevelSetting::Warn => log::LevelFilter::Warn,
            LogLevelSetting::Info => log::LevelFilter::Info,
            LogLevelSetting::Debug => log::LevelFilter::Debug,
            LogLevelSetting::Trace => log::LevelFilter::Trace,
        }
    }
}
