//! Virtual server abstraction.
//!
//! # Responsibilities
//! - Identify a balanced service by socket address or firewall mark
//! - Carry the bootstrap policy (alpha) and probe interval
//! - Answer whether the failover protocol governs the service address

use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use crate::topology::RealServerId;

/// Handle of a virtual server inside a [`Topology`](crate::topology::Topology).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VirtualServerId(pub(crate) usize);

/// How a virtual server is identified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceKey {
    /// Address + port.
    Inet(SocketAddr),
    /// Packet mark set by the firewall; no single routable address.
    FirewallMark(u32),
}

impl fmt::Display for ServiceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceKey::Inet(addr) => write!(f, "{}", addr),
            ServiceKey::FirewallMark(mark) => write!(f, "FWM {}", mark),
        }
    }
}

/// A virtual server exposed to clients.
#[derive(Debug, Clone)]
pub struct VirtualServer {
    service: ServiceKey,
    /// Treat every real server as failed until its first successful probe.
    alpha: bool,
    /// Interval between probe cycles.
    delay_loop: Duration,
    pub(crate) real_servers: Vec<RealServerId>,
}

impl VirtualServer {
    pub fn new(service: ServiceKey, alpha: bool, delay_loop: Duration) -> Self {
        Self {
            service,
            alpha,
            delay_loop,
            real_servers: Vec::new(),
        }
    }

    pub fn service(&self) -> ServiceKey {
        self.service
    }

    pub fn alpha(&self) -> bool {
        self.alpha
    }

    pub fn delay_loop(&self) -> Duration {
        self.delay_loop
    }

    pub fn real_servers(&self) -> &[RealServerId] {
        &self.real_servers
    }

    pub fn uses_firewall_mark(&self) -> bool {
        matches!(self.service, ServiceKey::FirewallMark(_))
    }

    /// Service address, `None` for firewall-mark services.
    pub fn address(&self) -> Option<IpAddr> {
        match self.service {
            ServiceKey::Inet(addr) => Some(addr.ip()),
            ServiceKey::FirewallMark(_) => None,
        }
    }

    /// Whether address ownership events may arm or disarm this service's
    /// checkers.
    pub fn is_failover_governed(&self) -> bool {
        !self.uses_firewall_mark()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_firewall_mark_service_has_no_address() {
        let vs = VirtualServer::new(ServiceKey::FirewallMark(7), true, Duration::from_secs(5));
        assert!(vs.uses_firewall_mark());
        assert!(!vs.is_failover_governed());
        assert_eq!(vs.address(), None);
        assert_eq!(vs.service().to_string(), "FWM 7");
    }

    #[test]
    fn test_inet_service_is_failover_governed() {
        let vs = VirtualServer::new(
            ServiceKey::Inet("[2001:db8::1]:443".parse().unwrap()),
            false,
            Duration::from_secs(5),
        );
        assert!(vs.is_failover_governed());
        assert_eq!(vs.address(), Some("2001:db8::1".parse().unwrap()));
    }
}
