//! Shared utilities for integration testing.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures_util::future::{self, BoxFuture};

use checkerd::checker::{Checker, CheckerId, ProbeOutcome};
use checkerd::scheduler::{ScheduledLaunch, Scheduler};
use checkerd::topology::{RealServerId, ServiceKey, Topology, VirtualServer, VirtualServerId};

/// A payload that counts how often the registry touches it.
#[derive(Debug, Default)]
pub struct CountingCheck {
    pub name: &'static str,
    pub launchable: bool,
    released: AtomicUsize,
}

impl CountingCheck {
    pub fn new(name: &'static str) -> Arc<Self> {
        Arc::new(Self {
            name,
            launchable: true,
            released: AtomicUsize::new(0),
        })
    }

    #[allow(dead_code)]
    pub fn without_launch(name: &'static str) -> Arc<Self> {
        Arc::new(Self {
            name,
            launchable: false,
            released: AtomicUsize::new(0),
        })
    }

    pub fn releases(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }
}

impl Checker for CountingCheck {
    fn kind(&self) -> &'static str {
        "counting"
    }

    fn is_launchable(&self) -> bool {
        self.launchable
    }

    fn probe(&self) -> BoxFuture<'_, ProbeOutcome> {
        Box::pin(future::ready(ProbeOutcome::Success))
    }

    fn describe(&self) -> Vec<String> {
        vec![format!("   Check = {}", self.name)]
    }

    fn release(&self) {
        self.released.fetch_add(1, Ordering::SeqCst);
    }
}

/// Records every `schedule_after` call.
#[derive(Default)]
pub struct RecordingScheduler {
    pub scheduled: Vec<(Duration, CheckerId)>,
    pub cancels: usize,
}

impl Scheduler for RecordingScheduler {
    fn schedule_after(&mut self, delay: Duration, launch: ScheduledLaunch) {
        self.scheduled.push((delay, launch.checker_id));
    }

    fn cancel_all(&mut self) {
        self.cancels += 1;
    }
}

pub fn add_service(
    topology: &mut Topology,
    service: ServiceKey,
    alpha: bool,
    real_server: &str,
) -> (VirtualServerId, RealServerId) {
    let vs = topology.add_virtual_server(VirtualServer::new(service, alpha, Duration::from_secs(6)));
    let rs = topology.add_real_server(vs, real_server.parse().unwrap(), 1);
    (vs, rs)
}

pub fn inet(addr: &str) -> ServiceKey {
    ServiceKey::Inet(addr.parse().unwrap())
}
