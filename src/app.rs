//! Application module: exposes the app model used by the TUI and runtime.
//!
//! The `App` model lives in `app::model` and holds the search results,
//! the view state, the now-playing state and the error dialog.

mod model;

pub use model::*;

#[cfg(test)]
mod tests;
