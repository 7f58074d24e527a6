use crate::ui::Mount;

/// Startup failures. Any of these aborts the application.
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("Initialization failed: no room on screen for mount point '{0}'")]
    MissingMount(Mount),
    #[error("Initialization failed: no audio output ({0})")]
    AudioOutput(String),
    #[error("Initialization failed: could not build HTTP client ({0})")]
    Client(String),
}

impl InitError {
    /// Text that replaces the whole screen.
    pub const SCREEN: &'static str =
        "A critical error occurred. Could not initialize the application.";
}
