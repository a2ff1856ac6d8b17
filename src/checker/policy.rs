//! Arming policy applied when a checker is registered.
//!
//! # Rules
//! - Firewall-mark services have no address to own: checkers start armed
//! - Address-based services start disarmed until ownership is established
//! - Without a failover protocol every checker starts armed
//! - Alpha mode marks the new checker as failed on its real server

use crate::checker::CheckerId;
use crate::topology::{RealServer, VirtualServer};

/// Decides the initial arm state of new checkers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArmingPolicy {
    /// Address ownership is managed by a failover protocol.
    FailoverGoverned,
    /// No failover protocol: ownership is not a concept.
    Standalone,
}

impl Default for ArmingPolicy {
    fn default() -> Self {
        if cfg!(feature = "standalone") {
            ArmingPolicy::Standalone
        } else {
            ArmingPolicy::FailoverGoverned
        }
    }
}

impl ArmingPolicy {
    /// Initial `enabled` value for a checker of `vs`.
    pub fn initial_arm(&self, vs: &VirtualServer) -> bool {
        match self {
            ArmingPolicy::Standalone => true,
            ArmingPolicy::FailoverGoverned => vs.uses_firewall_mark(),
        }
    }

    /// Apply the policy to a freshly allocated checker.
    ///
    /// Returns the initial `enabled` value. In alpha mode `id` is also added to
    /// the real server's failed set, whatever the arm state.
    pub fn on_register(&self, vs: &VirtualServer, rs: &mut RealServer, id: CheckerId) -> bool {
        if vs.alpha() {
            rs.mark_failed(id);
        }
        self.initial_arm(vs)
    }
}
