//! Checker registry.
//!
//! # Responsibilities
//! - Own every checker record in registration order
//! - Allocate identities and apply the arming policy on insert
//! - Describe and tear down the whole set at once

use std::net::SocketAddr;
use std::sync::Arc;

use serde::Serialize;

use crate::checker::{ArmingPolicy, Checker, CheckerId, CheckerRecord, IdAllocator};
use crate::observability::metrics;
use crate::topology::{RealServerId, Topology, VirtualServerId};

const DUMP_HEADER: &str = "------< Health checkers >------";

/// Point-in-time view of one checker, for machine-readable dumps.
#[derive(Debug, Clone, Serialize)]
pub struct CheckerSnapshot {
    pub id: CheckerId,
    pub kind: &'static str,
    pub enabled: bool,
    pub service: String,
    pub real_server: SocketAddr,
    pub weight: u32,
    /// Whether this checker currently holds its real server down.
    pub failing: bool,
}

/// Ordered collection of every checker of one configuration generation.
#[derive(Debug, Default)]
pub struct CheckerRegistry {
    records: Vec<CheckerRecord>,
    ids: IdAllocator,
    policy: ArmingPolicy,
    /// Configuration generation stamped on every launch, so reports from a
    /// replaced registry can be told apart from this one's.
    generation: u64,
    /// Log every raw address event seen by the synchronizer.
    pub(crate) log_address_events: bool,
}

impl CheckerRegistry {
    /// Create an empty registry with the build's default arming policy.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: ArmingPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn set_log_address_events(&mut self, enabled: bool) {
        self.log_address_events = enabled;
    }

    pub fn policy(&self) -> ArmingPolicy {
        self.policy
    }

    pub fn set_generation(&mut self, generation: u64) {
        self.generation = generation;
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Register a checker for real server `rs` of virtual server `vs`.
    ///
    /// Panics if `rs` is not a real server of `vs` in `topology`.
    pub fn register(
        &mut self,
        topology: &mut Topology,
        vs: VirtualServerId,
        rs: RealServerId,
        checker: Arc<dyn Checker>,
    ) -> &CheckerRecord {
        assert!(
            topology.contains_real_server(rs) && topology.real_server(rs).virtual_server() == vs,
            "checker registered against {:?} which is not a real server of {:?}",
            rs,
            vs
        );

        let id = self.ids.allocate();
        let service = topology.virtual_server(vs).clone();
        let enabled = self.policy.on_register(&service, topology.real_server_mut(rs), id);

        tracing::debug!(
            checker = %id,
            kind = checker.kind(),
            real_server = %topology.real_server(rs).addr(),
            enabled,
            alpha = service.alpha(),
            "Checker registered"
        );
        metrics::record_checker_armed(id, enabled);

        self.records.push(CheckerRecord::new(id, enabled, vs, rs, checker));
        metrics::record_registered_checkers(self.records.len());
        &self.records[self.records.len() - 1]
    }

    /// Iterate records in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &CheckerRecord> {
        self.records.iter()
    }

    pub fn for_each<F: FnMut(&CheckerRecord)>(&self, visitor: F) {
        self.records.iter().for_each(visitor);
    }

    pub fn get(&self, id: CheckerId) -> Option<&CheckerRecord> {
        // ids are dense and issued in push order
        self.records.get(id.0 as usize).filter(|r| r.id() == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Release every payload, drop every record and restart ids at zero.
    pub fn teardown_all(&mut self) {
        if !self.records.is_empty() {
            tracing::info!(checkers = self.records.len(), "Releasing health checkers");
        }
        for record in self.records.drain(..) {
            record.checker().release();
            metrics::forget_checker(record.id());
        }
        self.ids.reset();
        metrics::record_registered_checkers(0);
    }

    /// Descriptive lines for every record; empty when there are none.
    pub fn describe(&self, topology: &Topology) -> Vec<String> {
        if self.records.is_empty() {
            return Vec::new();
        }

        let mut lines = vec![DUMP_HEADER.to_string()];
        for record in &self.records {
            lines.push(format!(" {}", topology.real_server(record.real_server()).addr()));
            lines.extend(record.checker().describe());
        }
        lines
    }

    pub fn snapshot(&self, topology: &Topology) -> Vec<CheckerSnapshot> {
        self.records
            .iter()
            .map(|record| {
                let rs = topology.real_server(record.real_server());
                CheckerSnapshot {
                    id: record.id(),
                    kind: record.checker().kind(),
                    enabled: record.is_enabled(),
                    service: topology.virtual_server(record.virtual_server()).service().to_string(),
                    real_server: rs.addr(),
                    weight: rs.weight(),
                    failing: rs.failed_checkers().contains(&record.id()),
                }
            })
            .collect()
    }

    /// Log [`describe`](Self::describe) at info level.
    pub fn dump(&self, topology: &Topology) {
        for line in self.describe(topology) {
            tracing::info!("{}", line);
        }
    }
}
