//! Configuration management for the creek client
//!
//! Settings come from built-in defaults, an optional `creek.toml`, and
//! `CREEK_*` environment variables, in increasing order of precedence.

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::client::{SessionOptions, TurnOrder};

/// Config file names tried, relative to the working directory
const CONFIG_PATHS: [&str; 2] = ["creek", "config/creek"];

/// Default bytes requested per socket read
pub const DEFAULT_READ_BUFFER_SIZE: usize = 1024;

/// Complete client configuration
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ClientConfig {
    /// Text printed before each line of user input
    /// Environment: CREEK_PROMPT
    pub prompt: String,

    /// Whether the peer or the user speaks first after connecting
    /// Environment: CREEK_TURN_ORDER (server_first | client_first)
    pub turn_order: TurnOrder,

    /// Bytes requested from the socket per read
    /// Environment: CREEK_READ_BUFFER_SIZE
    pub read_buffer_size: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            prompt: "> ".to_string(),
            turn_order: TurnOrder::ServerFirst,
            read_buffer_size: DEFAULT_READ_BUFFER_SIZE,
        }
    }
}

impl ClientConfig {
    /// Load configuration from defaults, config files, and the environment
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(&CONFIG_PATHS, Environment::with_prefix("CREEK"))
    }

    fn load_from(paths: &[&str], env: Environment) -> Result<Self, config::ConfigError> {
        let defaults = Self::default();

        let mut builder = Config::builder()
            .set_default("prompt", defaults.prompt)?
            .set_default("turn_order", "server_first")?
            .set_default("read_buffer_size", defaults.read_buffer_size as i64)?;

        for path in paths {
            builder = builder.add_source(File::with_name(path).required(false));
        }

        let config: ClientConfig = builder.add_source(env).build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validation for all configuration values
    fn validate(&self) -> Result<(), config::ConfigError> {
        if self.read_buffer_size == 0 {
            return Err(config::ConfigError::Message(
                "read_buffer_size must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Per-session settings derived from this configuration
    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            turn_order: self.turn_order,
            read_buffer_size: self.read_buffer_size,
        }
    }
}
