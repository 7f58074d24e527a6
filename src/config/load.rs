use std::{env, path::PathBuf};

use super::schema::Settings;

/// Fades block the audio thread, so they are kept short.
pub const MAX_FADE_MS: u64 = 5_000;

/// Configuration loading helpers.
///
/// `Settings::load` reads an optional config file, then environment
/// variables (prefix `TUNEPEEK__`) and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("TUNEPEEK")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        if self.search.limit == 0 {
            return Err("search.limit must be >= 1".to_string());
        }
        if self.search.endpoint.trim().is_empty() {
            return Err("search.endpoint must not be empty".to_string());
        }
        if self.audio.crossfade_ms > MAX_FADE_MS {
            return Err(format!("audio.crossfade_ms must be <= {MAX_FADE_MS}"));
        }
        if self.audio.quit_fade_out_ms > MAX_FADE_MS {
            return Err(format!("audio.quit_fade_out_ms must be <= {MAX_FADE_MS}"));
        }
        if self.audio.crossfade_steps == 0 {
            return Err("audio.crossfade_steps must be >= 1".to_string());
        }
        if !(0.0..=1.0).contains(&self.audio.volume) {
            return Err("audio.volume must be between 0.0 and 1.0".to_string());
        }
        if self.ui.card_width < 16 {
            return Err("ui.card_width must be >= 16".to_string());
        }
        if self.ui.card_height < 6 {
            return Err("ui.card_height must be >= 6".to_string());
        }
        Ok(())
    }
}

/// Resolve the config path from `TUNEPEEK_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("TUNEPEEK_CONFIG_PATH") {
        return Some(PathBuf::from(p));
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/tunepeek/config.toml`
/// or `~/.config/tunepeek/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    xdg_dir("XDG_CONFIG_HOME", ".config").map(|d| d.join("tunepeek").join("config.toml"))
}

/// Compute the default log path under `$XDG_STATE_HOME/tunepeek/tunepeek.log`
/// or `~/.local/state/tunepeek/tunepeek.log`.
pub fn default_log_path() -> Option<PathBuf> {
    xdg_dir("XDG_STATE_HOME", ".local/state").map(|d| d.join("tunepeek").join("tunepeek.log"))
}

fn xdg_dir(var: &str, home_fallback: &str) -> Option<PathBuf> {
    if let Some(xdg) = env::var_os(var).filter(|v| !v.is_empty()) {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(home_fallback))
    }
}
