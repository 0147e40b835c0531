//! Error types
//!
//! Defines the error types for each stage of a client run: argument parsing,
//! address parsing, connecting, and the send/receive turns of a session.

use std::fmt;
use std::io;

use crate::client::SessionState;

/// Errors produced while splitting a `host:port` address
#[derive(Debug, PartialEq)]
pub enum AddressParseError {
    MissingColon(String),
    TooManyColons(String),
    EmptyHost(String),
    InvalidPort(String),
}

impl fmt::Display for AddressParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressParseError::MissingColon(a) => write!(f, "Missing ':' in address: {}", a),
            AddressParseError::TooManyColons(a) => {
                write!(f, "Address must contain exactly one ':': {}", a)
            }
            AddressParseError::EmptyHost(a) => write!(f, "Host is empty in address: {}", a),
            AddressParseError::InvalidPort(p) => {
                write!(f, "Invalid port {}: must be a number between 1 and 65535", p)
            }
        }
    }
}

impl std::error::Error for AddressParseError {}

/// Errors produced while parsing the command line
#[derive(Debug, PartialEq)]
pub enum CommandError {
    Usage,
    Address(AddressParseError),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::Usage => write!(f, "Usage: creek connect <host>:<port>"),
            CommandError::Address(e) => {
                write!(f, "Invalid address. Use format <host>:<port> ({})", e)
            }
        }
    }
}

impl std::error::Error for CommandError {}

impl From<AddressParseError> for CommandError {
    fn from(error: AddressParseError) -> Self {
        CommandError::Address(error)
    }
}

/// Errors produced while opening a connection
#[derive(Debug)]
pub enum ConnectError {
    EmptyHost,
    InvalidPort(u16),
    Io { target: String, source: io::Error },
}

impl fmt::Display for ConnectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectError::EmptyHost => write!(f, "Host cannot be empty"),
            ConnectError::InvalidPort(port) => {
                write!(f, "Invalid port {}: must be between 1 and 65535", port)
            }
            ConnectError::Io { target, source } => write!(f, "{}: {}", target, source),
        }
    }
}

impl std::error::Error for ConnectError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConnectError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Errors produced while writing a line to the peer
#[derive(Debug)]
pub enum SendError {
    /// The peer has gone away; the session cannot be used again.
    BrokenPipe,
    EmbeddedDelimiter,
    NotReady(SessionState),
    Io(io::Error),
}

impl fmt::Display for SendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SendError::BrokenPipe => write!(f, "Broken pipe: peer closed the connection"),
            SendError::EmbeddedDelimiter => write!(f, "Line must not contain a newline"),
            SendError::NotReady(state) => write!(f, "Cannot send while session is {}", state),
            SendError::Io(e) => write!(f, "Send failed: {}", e),
        }
    }
}

impl std::error::Error for SendError {}

/// Errors produced while waiting for a line from the peer
#[derive(Debug)]
pub enum RecvError {
    /// Orderly shutdown: the peer closed its write side.
    PeerClosed,
    /// Reset, broken pipe, or any other transport failure.
    ConnectionLost(io::Error),
    NotReady(SessionState),
}

impl fmt::Display for RecvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecvError::PeerClosed => write!(f, "Server closed the connection"),
            RecvError::ConnectionLost(e) => write!(f, "Connection lost: {}", e),
            RecvError::NotReady(state) => write!(f, "Cannot receive while session is {}", state),
        }
    }
}

impl std::error::Error for RecvError {}

/// Errors that stop the client before a session starts. Failures inside a
/// session end the interactive loop instead; see `LoopOutcome`.
#[derive(Debug)]
pub enum ClientError {
    Command(CommandError),
    Config(config::ConfigError),
    Connect(ConnectError),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Command(e) => write!(f, "{}", e),
            ClientError::Config(e) => write!(f, "Configuration error: {}", e),
            ClientError::Connect(e) => write!(f, "Connection failed: {}", e),
        }
    }
}

impl std::error::Error for ClientError {}

impl From<CommandError> for ClientError {
    fn from(error: CommandError) -> Self {
        ClientError::Command(error)
    }
}

impl From<config::ConfigError> for ClientError {
    fn from(error: config::ConfigError) -> Self {
        ClientError::Config(error)
    }
}

impl From<ConnectError> for ClientError {
    fn from(error: ConnectError) -> Self {
        ClientError::Connect(error)
    }
}
