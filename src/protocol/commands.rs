//! Module `commands`
//!
//! Parses the process arguments into a client command, and classifies each
//! line the user types as either data for the peer or a request to leave.

use crate::error::CommandError;
use crate::protocol::address::{Address, parse_address};

/// Words that end the session instead of being sent. Matched case-insensitively.
pub const EXIT_KEYWORDS: [&str; 2] = ["exit", "quit"];

/// A command given on the command line.
#[derive(Debug, PartialEq)]
pub enum Command {
    Connect(Address),
}

/// What to do with one line of user input.
#[derive(Debug, PartialEq)]
pub enum UserInput {
    Terminate,
    Line(String),
}

/// Parses arguments (without the program name): exactly `connect <host>:<port>`.
pub fn parse_args<S: AsRef<str>>(args: &[S]) -> Result<Command, CommandError> {
    match args {
        [cmd, addr] if cmd.as_ref() == "connect" => {
            Ok(Command::Connect(parse_address(addr.as_ref())?))
        }
        _ => Err(CommandError::Usage),
    }
}

/// Classifies a line of user input. The line's own terminator must already be
/// stripped.
pub fn parse_user_input(raw: &str) -> UserInput {
    let word = raw.trim();
    if EXIT_KEYWORDS.iter().any(|k| word.eq_ignore_ascii_case(k)) {
        UserInput::Terminate
    } else {
        UserInput::Line(raw.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AddressParseError;

    #[test]
    fn test_parse_connect_command() {
        assert_eq!(
            parse_args(&["connect", "localhost:8080"]),
            Ok(Command::Connect(Address {
                host: "localhost".to_string(),
                port: 8080
            }))
        );
    }

    #[test]
    fn test_usage_errors() {
        let empty: [&str; 0] = [];
        assert_eq!(parse_args(&empty), Err(CommandError::Usage));
        assert_eq!(parse_args(&["connect"]), Err(CommandError::Usage));
        assert_eq!(parse_args(&["dial", "localhost:8080"]), Err(CommandError::Usage));
        assert_eq!(
            parse_args(&["connect", "localhost:8080", "extra"]),
            Err(CommandError::Usage)
        );
    }

    #[test]
    fn test_bad_address_is_not_a_usage_error() {
        assert_eq!(
            parse_args(&["connect", "localhost"]),
            Err(CommandError::Address(AddressParseError::MissingColon(
                "localhost".to_string()
            )))
        );
    }

    #[test]
    fn test_exit_keywords_ignore_case() {
        assert_eq!(parse_user_input("exit"), UserInput::Terminate);
        assert_eq!(parse_user_input("EXIT"), UserInput::Terminate);
        assert_eq!(parse_user_input("Quit"), UserInput::Terminate);
        assert_eq!(parse_user_input("  quit "), UserInput::Terminate);
    }

    #[test]
    fn test_other_input_is_sent_verbatim() {
        assert_eq!(parse_user_input("SET k v"), UserInput::Line("SET k v".to_string()));
        assert_eq!(parse_user_input("exit now"), UserInput::Line("exit now".to_string()));
        assert_eq!(parse_user_input(""), UserInput::Line(String::new()));
    }
}
