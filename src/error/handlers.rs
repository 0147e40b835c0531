//! Error handlers
//!
//! Logs client errors and maps them to process exit codes.

use crate::error::types::ClientError;
use log::error;

/// Exit status for every failure path
pub const EXIT_FAILURE: u8 = 1;

/// Log a client error
pub fn handle_error(err: &ClientError) {
    error!("Client error: {}", err);
}

/// Convert error to process exit code
pub fn error_to_exit_code(err: &ClientError) -> u8 {
    match err {
        ClientError::Command(_) => EXIT_FAILURE,
        ClientError::Config(_) => EXIT_FAILURE,
        ClientError::Connect(_) => EXIT_FAILURE,
    }
}
