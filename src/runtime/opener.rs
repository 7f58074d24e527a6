use std::io;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::thread;

/// Tried in order when no opener is configured.
const OPENERS: [&str; 3] = ["xdg-open", "open", "wslview"];

#[derive(Debug, thiserror::Error)]
pub enum OpenError {
    #[error("no program found to open links")]
    NoOpener,
    #[error("failed to launch link opener: {0}")]
    Spawn(#[from] io::Error),
}

impl OpenError {
    pub const TITLE: &'static str = "Could Not Open Link";
    pub const MESSAGE: &'static str = "The link could not be opened in your browser.";
}

/// Locate the program that opens links: `configured` when given, else the
/// first of `OPENERS` on `PATH`.
pub fn find_opener(configured: Option<&str>) -> Result<PathBuf, OpenError> {
    match configured.map(str::trim).filter(|c| !c.is_empty()) {
        Some(cmd) => which::which(cmd).map_err(|_| OpenError::NoOpener),
        None => OPENERS
            .iter()
            .find_map(|c| which::which(c).ok())
            .ok_or(OpenError::NoOpener),
    }
}

/// Open `url` in the user's browser. The opener is detached from the
/// terminal; its exit status is only logged.
pub fn open(url: &str, configured: Option<&str>) -> Result<(), OpenError> {
    let program = find_opener(configured)?;
    let mut child = Command::new(&program)
        .arg(url)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    log::info!("opening {url} with {}", program.display());

    thread::spawn(move || match child.wait() {
        Ok(status) if !status.success() => log::warn!("link opener exited with {status}"),
        Ok(_) => {}
        Err(e) => log::warn!("failed to wait for link opener: {e}"),
    });
    Ok(())
}
