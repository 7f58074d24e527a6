mod app;
mod audio;
mod config;
mod error;
mod mpris;
mod runtime;
mod search;
mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
