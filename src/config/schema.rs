//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the daemon.
//! All types derive Serde traits for deserialization from config files.

use std::net::{IpAddr, SocketAddr};

use serde::{Deserialize, Serialize};

/// Root configuration for the checker daemon.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct TopologyConfig {
    /// Process-wide settings.
    pub global: GlobalConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Virtual server definitions, each with its real servers and checkers.
    pub virtual_servers: Vec<VirtualServerConfig>,
}

/// Process-wide settings.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GlobalConfig {
    /// Log every address add/remove event from the reflector.
    pub log_address_events: bool,

    /// Random extra delay (ms) added to the bootstrap delay of each checker.
    pub bootstrap_jitter_ms: u64,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9100".to_string(),
        }
    }
}

/// A virtual server, identified by exactly one of `address` or `fwmark`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VirtualServerConfig {
    /// Service address (e.g., "10.0.0.5:80").
    #[serde(default)]
    pub address: Option<SocketAddr>,

    /// Firewall mark identifying the service.
    #[serde(default)]
    pub fwmark: Option<u32>,

    /// Consider real servers failed until their first successful check.
    #[serde(default)]
    pub alpha: bool,

    /// Seconds between two probe cycles of each checker.
    #[serde(default = "default_delay_loop")]
    pub delay_loop_secs: u64,

    #[serde(default)]
    pub real_servers: Vec<RealServerConfig>,
}

fn default_delay_loop() -> u64 {
    60
}

/// Backend of a virtual server.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RealServerConfig {
    /// Backend address (e.g., "192.168.1.10:80").
    pub address: SocketAddr,

    /// Weight for weighted scheduling (default: 1).
    #[serde(default = "default_weight")]
    pub weight: u32,

    #[serde(default)]
    pub checkers: Vec<CheckerConfig>,
}

fn default_weight() -> u32 {
    1
}

/// One configured probe, tagged by `kind`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CheckerConfig {
    Tcp(TcpCheckConfig),
    Http(HttpCheckConfig),
}

impl CheckerConfig {
    pub fn kind(&self) -> &'static str {
        match self {
            CheckerConfig::Tcp(_) => "tcp",
            CheckerConfig::Http(_) => "http",
        }
    }

    pub fn connect_timeout_secs(&self) -> u64 {
        match self {
            CheckerConfig::Tcp(c) => c.connect_timeout_secs,
            CheckerConfig::Http(c) => c.connect_timeout_secs,
        }
    }
}

/// TCP connect check.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TcpCheckConfig {
    /// Connect here instead of the real server address.
    #[serde(default)]
    pub connect_ip: Option<IpAddr>,

    /// Connect to this port instead of the real server port.
    #[serde(default)]
    pub connect_port: Option<u16>,

    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

/// HTTP GET check.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HttpCheckConfig {
    #[serde(default)]
    pub connect_ip: Option<IpAddr>,

    #[serde(default)]
    pub connect_port: Option<u16>,

    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// Path to request.
    #[serde(default = "default_path")]
    pub path: String,

    /// Required status code; any 2xx when absent.
    #[serde(default)]
    pub expected_status: Option<u16>,
}

fn default_connect_timeout() -> u64 {
    5
}

fn default_path() -> String {
    "/".to_string()
}
