//! Concrete probe payloads.
//!
//! # Responsibilities
//! - Implement the `Checker` capability set for each probe kind
//! - Resolve a probe's destination from its real server
//! - Translate configuration into payloads
//!
//! # Design Decisions
//! - A probe targets its real server unless `connect_ip`/`connect_port` say
//!   otherwise
//! - Failures carry a human-readable reason for the logs

pub mod http;
pub mod tcp;

pub use http::HttpCheck;
pub use tcp::TcpCheck;

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use crate::checker::Checker;
use crate::config::CheckerConfig;

/// Errors raised while running or building a probe.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("unexpected status {actual}, expected {expected}")]
    Status { actual: u16, expected: String },

    #[error("invalid probe URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("probe path {0:?} does not stay on the destination host")]
    ForeignPath(String),
}

/// Where a probe connects: the real server, with optional overrides.
pub fn probe_destination(
    real_server: SocketAddr,
    connect_ip: Option<IpAddr>,
    connect_port: Option<u16>,
) -> SocketAddr {
    let mut dst = real_server;
    if let Some(ip) = connect_ip {
        dst.set_ip(ip);
    }
    if let Some(port) = connect_port {
        dst.set_port(port);
    }
    dst
}

/// Build the payload for one configured checker of `real_server`.
pub fn build_checker(
    config: &CheckerConfig,
    real_server: SocketAddr,
) -> Result<Arc<dyn Checker>, ProbeError> {
    let checker: Arc<dyn Checker> = match config {
        CheckerConfig::Tcp(tcp) => {
            let dst = probe_destination(real_server, tcp.connect_ip, tcp.connect_port);
            Arc::new(TcpCheck::new(dst, Duration::from_secs(tcp.connect_timeout_secs)))
        }
        CheckerConfig::Http(http) => {
            let dst = probe_destination(real_server, http.connect_ip, http.connect_port);
            Arc::new(HttpCheck::new(
                dst,
                &http.path,
                http.expected_status,
                Duration::from_secs(http.connect_timeout_secs),
            )?)
        }
    };
    Ok(checker)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_destination_defaults_to_real_server() {
        let rs: SocketAddr = "192.168.1.10:80".parse().unwrap();
        assert_eq!(probe_destination(rs, None, None), rs);
        assert_eq!(
            probe_destination(rs, None, Some(8080)),
            "192.168.1.10:8080".parse::<SocketAddr>().unwrap()
        );
        assert_eq!(
            probe_destination(rs, Some("10.1.1.1".parse().unwrap()), None),
            "10.1.1.1:80".parse::<SocketAddr>().unwrap()
        );
    }

    #[test]
    fn test_destination_port_override_keeps_v6() {
        let rs: SocketAddr = "[2001:db8::10]:443".parse().unwrap();
        assert_eq!(
            probe_destination(rs, None, Some(8443)),
            "[2001:db8::10]:8443".parse::<SocketAddr>().unwrap()
        );
    }
}
