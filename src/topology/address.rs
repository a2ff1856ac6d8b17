//! Address ownership events reported by the host's address reflector.

use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;

use thiserror::Error;

/// An address appeared on (`present`) or disappeared from the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressEvent {
    pub address: IpAddr,
    pub present: bool,
}

impl AddressEvent {
    pub fn added(address: IpAddr) -> Self {
        Self { address, present: true }
    }

    pub fn removed(address: IpAddr) -> Self {
        Self { address, present: false }
    }
}

impl fmt::Display for AddressEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = if self.present { "add" } else { "del" };
        write!(f, "{} {}", op, self.address)
    }
}

/// Error parsing a textual address event.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressEventParseError {
    #[error("expected `add <ip>` or `del <ip>`, got {0:?}")]
    Malformed(String),
    #[error("unknown operation {0:?}")]
    UnknownOperation(String),
    #[error("invalid address {0:?}")]
    InvalidAddress(String),
}

impl FromStr for AddressEvent {
    type Err = AddressEventParseError;

    /// Parses `add <ip>` / `del <ip>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let (op, addr) = match (parts.next(), parts.next(), parts.next()) {
            (Some(op), Some(addr), None) => (op, addr),
            _ => return Err(AddressEventParseError::Malformed(s.to_string())),
        };

        let present = match op {
            "add" => true,
            "del" => false,
            other => return Err(AddressEventParseError::UnknownOperation(other.to_string())),
        };

        let address = addr
            .parse()
            .map_err(|_| AddressEventParseError::InvalidAddress(addr.to_string()))?;

        Ok(Self { address, present })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_events() {
        let ev: AddressEvent = "add 10.0.0.5".parse().unwrap();
        assert_eq!(ev, AddressEvent::added("10.0.0.5".parse().unwrap()));

        let ev: AddressEvent = "  del   2001:db8::5 ".parse().unwrap();
        assert_eq!(ev, AddressEvent::removed("2001:db8::5".parse().unwrap()));
        assert_eq!(ev.to_string(), "del 2001:db8::5");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(
            "flush 10.0.0.5".parse::<AddressEvent>(),
            Err(AddressEventParseError::UnknownOperation("flush".into()))
        );
        assert_eq!(
            "add 10.0.0.256".parse::<AddressEvent>(),
            Err(AddressEventParseError::InvalidAddress("10.0.0.256".into()))
        );
        assert!(matches!(
            "add".parse::<AddressEvent>(),
            Err(AddressEventParseError::Malformed(_))
        ));
    }
}
