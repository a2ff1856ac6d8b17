//! Real server (backend endpoint) state.
//!
//! # Responsibilities
//! - Represent a single backend behind a virtual server
//! - Track which checkers currently consider it failed
//!
//! # State Transitions
//! ```text
//! Alive → Down: first checker id enters failed_checkers
//! Down → Alive: last checker id leaves failed_checkers
//! ```

use std::collections::BTreeSet;
use std::net::SocketAddr;

use crate::checker::CheckerId;
use crate::topology::VirtualServerId;

/// Handle of a real server inside a [`Topology`](crate::topology::Topology).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RealServerId(pub(crate) usize);

/// A backend target of a virtual server.
#[derive(Debug, Clone)]
pub struct RealServer {
    virtual_server: VirtualServerId,
    addr: SocketAddr,
    weight: u32,
    failed_checkers: BTreeSet<CheckerId>,
}

impl RealServer {
    pub(crate) fn new(virtual_server: VirtualServerId, addr: SocketAddr, weight: u32) -> Self {
        Self {
            virtual_server,
            addr,
            weight,
            failed_checkers: BTreeSet::new(),
        }
    }

    pub fn virtual_server(&self) -> VirtualServerId {
        self.virtual_server
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn weight(&self) -> u32 {
        self.weight
    }

    pub fn failed_checkers(&self) -> &BTreeSet<CheckerId> {
        &self.failed_checkers
    }

    /// Mark `id` as failing this server. Returns false if it already was.
    pub fn mark_failed(&mut self, id: CheckerId) -> bool {
        self.failed_checkers.insert(id)
    }

    /// A real server is alive when no checker reports it failed.
    pub fn is_alive(&self) -> bool {
        self.failed_checkers.is_empty()
    }

    /// Apply one probe result.
    ///
    /// Returns `Some(alive)` when the result flipped the alive state.
    pub fn record_result(&mut self, id: CheckerId, success: bool) -> Option<bool> {
        let was_alive = self.is_alive();
        if success {
            self.failed_checkers.remove(&id);
        } else {
            self.failed_checkers.insert(id);
        }
        let alive = self.is_alive();
        (alive != was_alive).then_some(alive)
    }
}
