//! TCP connect probe.

use std::net::SocketAddr;
use std::time::Duration;

use futures_util::future::BoxFuture;
use tokio::net::TcpStream;
use tokio::time;

use crate::checker::{Checker, ProbeOutcome};
use crate::probes::ProbeError;

/// Succeeds when a TCP connection to `destination` opens within the timeout.
#[derive(Debug, Clone)]
pub struct TcpCheck {
    destination: SocketAddr,
    connect_timeout: Duration,
}

impl TcpCheck {
    pub fn new(destination: SocketAddr, connect_timeout: Duration) -> Self {
        Self {
            destination,
            connect_timeout,
        }
    }

    async fn connect(&self) -> Result<(), ProbeError> {
        match time::timeout(self.connect_timeout, TcpStream::connect(self.destination)).await {
            Ok(Ok(_stream)) => Ok(()),
            Ok(Err(e)) => Err(ProbeError::Connect(e.to_string())),
            Err(_) => Err(ProbeError::Timeout(self.connect_timeout)),
        }
    }
}

impl Checker for TcpCheck {
    fn kind(&self) -> &'static str {
        "tcp"
    }

    fn probe(&self) -> BoxFuture<'_, ProbeOutcome> {
        Box::pin(async move {
            match self.connect().await {
                Ok(()) => ProbeOutcome::Success,
                Err(e) => {
                    tracing::warn!(addr = %self.destination, error = %e, "TCP check failed");
                    ProbeOutcome::Failure(e.to_string())
                }
            }
        })
    }

    fn describe(&self) -> Vec<String> {
        vec![
            "   Keepalive method = TCP_CHECK".to_string(),
            format!("   Connection dest = {}", self.destination),
            format!("   Connection timeout = {}", self.connect_timeout.as_secs()),
        ]
    }
}
