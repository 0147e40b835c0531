//! Module `address`
//!
//! Parses `host:port` strings given on the command line. The host is kept as
//! text so name resolution happens at connect time.

use std::fmt;

use crate::error::AddressParseError;

/// A remote endpoint as typed by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    pub host: String,
    pub port: u16,
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Splits `raw` on its only colon into a host and a port in 1..=65535.
///
/// Bracketed IPv6 literals are not supported.
pub fn parse_address(raw: &str) -> Result<Address, AddressParseError> {
    let mut parts = raw.split(':');
    let (host, port) = match (parts.next(), parts.next(), parts.next()) {
        (Some(host), Some(port), None) => (host, port),
        (_, None, _) => return Err(AddressParseError::MissingColon(raw.to_string())),
        _ => return Err(AddressParseError::TooManyColons(raw.to_string())),
    };

    if host.is_empty() {
        return Err(AddressParseError::EmptyHost(raw.to_string()));
    }

    let port = match port.parse::<u16>() {
        Ok(0) | Err(_) => return Err(AddressParseError::InvalidPort(port.to_string())),
        Ok(port) => port,
    };

    Ok(Address {
        host: host.to_string(),
        port,
    })
}
