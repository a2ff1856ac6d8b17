//! Checker activity synchronization with host address ownership.
//!
//! # Rules
//! - Only checkers of address-based services react to address events
//! - Families are compared first; addresses never compare across families
//! - The arm flag always follows the event; only real transitions are logged

use std::net::IpAddr;

use crate::checker::{CheckerRecord, CheckerRegistry};
use crate::observability::metrics;
use crate::topology::{AddressEvent, Topology, VirtualServer};

/// Whether `vs` is addressed by exactly `event_addr`.
fn service_address_matches(vs: &VirtualServer, event_addr: IpAddr) -> bool {
    match (vs.address(), event_addr) {
        (Some(IpAddr::V4(vip)), IpAddr::V4(addr)) => vip.octets() == addr.octets(),
        (Some(IpAddr::V6(vip)), IpAddr::V6(addr)) => vip.octets() == addr.octets(),
        _ => false,
    }
}

impl CheckerRegistry {
    /// Apply an address add/remove event to every matching checker.
    ///
    /// Returns the number of checkers whose arm state actually changed.
    pub fn on_address_event(&self, topology: &Topology, address: IpAddr, present: bool) -> usize {
        if self.log_address_events {
            tracing::info!(
                address = %address,
                "Address reflector reports IP {} {}",
                address,
                if present { "added" } else { "removed" }
            );
        }

        if self.is_empty() {
            return 0;
        }

        let mut transitions = 0;
        for record in self.iter() {
            let vs = topology.virtual_server(record.virtual_server());
            if !service_address_matches(vs, address) || !vs.is_failover_governed() {
                continue;
            }

            if record.is_enabled() != present {
                log_transition(topology, record, present);
                metrics::record_checker_transition(present);
                transitions += 1;
            }
            record.set_enabled(present);
            metrics::record_checker_armed(record.id(), present);
        }

        transitions
    }

    pub fn apply_address_event(&self, topology: &Topology, event: AddressEvent) -> usize {
        self.on_address_event(topology, event.address, event.present)
    }
}

fn log_transition(topology: &Topology, record: &CheckerRecord, armed: bool) {
    let rs = topology.real_server(record.real_server()).addr();
    if armed {
        tracing::info!(
            checker = %record.id(),
            "Activating healthchecker for service [{}]:{}",
            rs.ip(),
            rs.port()
        );
    } else {
        tracing::info!(
            checker = %record.id(),
            "Suspending healthchecker for service [{}]:{}",
            rs.ip(),
            rs.port()
        );
    }
}
