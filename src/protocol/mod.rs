//! Line protocol
//!
//! Address and command parsing, and newline framing for the wire.

pub mod address;
pub mod commands;
pub mod framing;

pub use address::{Address, parse_address};
pub use commands::{Command, UserInput, parse_args, parse_user_input};
pub use framing::{LineBuffer, encode_line};
