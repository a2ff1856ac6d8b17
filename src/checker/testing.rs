//! Fixtures shared by the checker unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures_util::future::{self, BoxFuture};

use crate::checker::{Checker, ProbeOutcome};
use crate::topology::{RealServerId, ServiceKey, Topology, VirtualServer, VirtualServerId};

#[derive(Debug, Default)]
pub struct StubCheck {
    unlaunchable: bool,
    released: AtomicUsize,
}

impl StubCheck {
    pub fn arc() -> Arc<dyn Checker> {
        Arc::new(Self::default())
    }

    pub fn unlaunchable() -> Arc<dyn Checker> {
        Arc::new(Self {
            unlaunchable: true,
            released: AtomicUsize::new(0),
        })
    }

    pub fn releases(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }
}

impl Checker for StubCheck {
    fn kind(&self) -> &'static str {
        "stub"
    }

    fn is_launchable(&self) -> bool {
        !self.unlaunchable
    }

    fn probe(&self) -> BoxFuture<'_, ProbeOutcome> {
        Box::pin(future::ready(ProbeOutcome::Success))
    }

    fn describe(&self) -> Vec<String> {
        vec!["   Keepalive method = STUB".to_string()]
    }

    fn release(&self) {
        self.released.fetch_add(1, Ordering::SeqCst);
    }
}

/// An IPv4 service `10.0.0.5:80` and a firewall-mark service `42`, one real
/// server each.
pub fn fixture(alpha: bool) -> (Topology, VirtualServerId, RealServerId, VirtualServerId, RealServerId) {
    let mut topology = Topology::new();
    let delay = Duration::from_secs(6);

    let inet = topology.add_virtual_server(VirtualServer::new(
        ServiceKey::Inet("10.0.0.5:80".parse().unwrap()),
        alpha,
        delay,
    ));
    let inet_rs = topology.add_real_server(inet, "192.168.1.10:80".parse().unwrap(), 1);

    let fwmark = topology.add_virtual_server(VirtualServer::new(ServiceKey::FirewallMark(42), alpha, delay));
    let fwmark_rs = topology.add_real_server(fwmark, "192.168.2.10:80".parse().unwrap(), 1);

    (topology, inet, inet_rs, fwmark, fwmark_rs)
}
