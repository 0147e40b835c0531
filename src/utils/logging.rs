//! Logging utilities
//!
//! Provides logging setup and configuration.

use env_logger;

/// Setup logging for the client (`RUST_LOG` selects the level, errors only by default)
pub fn setup_logging() {
    env_logger::init();
}
