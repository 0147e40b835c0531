pub mod client;
pub mod config;
pub mod error;
pub mod protocol;
pub mod utils;

pub use client::{LineClient, Session};
pub use config::ClientConfig;
