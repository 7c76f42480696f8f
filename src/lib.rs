// aka library - Public API

// Re-export error types
pub mod error;
pub use error::{AkaError, Result};

// Module declarations
pub mod commands;
pub mod core;
pub mod ui;

// Initialize logging
pub fn init_logging() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();
}
