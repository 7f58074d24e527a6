use crate::config;

/// Load and validate settings. Runs before the terminal is taken over, so
/// problems are reported on stderr.
pub fn load_settings() -> config::Settings {
    match config::Settings::load() {
        Ok(s) => {
            if let Err(msg) = s.validate() {
                eprintln!("tunepeek: invalid config, using defaults: {msg}");
                config::Settings::default()
            } else {
                s
            }
        }
        Err(e) => {
            // Config is optional; failures should not prevent the app from starting.
            eprintln!("tunepeek: failed to load config, using defaults: {e}");
            config::Settings::default()
        }
    }
}
