//! Checker record: the unit of lifecycle state.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::checker::{Checker, CheckerId};
use crate::topology::{RealServerId, VirtualServerId};

/// Shared arm flag read by the scheduler before every launch.
#[derive(Debug, Clone, Default)]
pub struct ArmFlag(Arc<AtomicBool>);

impl ArmFlag {
    pub fn new(armed: bool) -> Self {
        Self(Arc::new(AtomicBool::new(armed)))
    }

    pub fn is_armed(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    pub fn set(&self, armed: bool) {
        self.0.store(armed, Ordering::Relaxed);
    }
}

/// One registered checker.
#[derive(Debug)]
pub struct CheckerRecord {
    id: CheckerId,
    enabled: ArmFlag,
    virtual_server: VirtualServerId,
    real_server: RealServerId,
    checker: Arc<dyn Checker>,
}

impl CheckerRecord {
    pub(crate) fn new(
        id: CheckerId,
        enabled: bool,
        virtual_server: VirtualServerId,
        real_server: RealServerId,
        checker: Arc<dyn Checker>,
    ) -> Self {
        Self {
            id,
            enabled: ArmFlag::new(enabled),
            virtual_server,
            real_server,
            checker,
        }
    }

    pub fn id(&self) -> CheckerId {
        self.id
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.is_armed()
    }

    pub(crate) fn set_enabled(&self, enabled: bool) {
        self.enabled.set(enabled);
    }

    /// A handle on the arm flag for the scheduler.
    pub fn arm_flag(&self) -> ArmFlag {
        self.enabled.clone()
    }

    pub fn virtual_server(&self) -> VirtualServerId {
        self.virtual_server
    }

    pub fn real_server(&self) -> RealServerId {
        self.real_server
    }

    pub fn checker(&self) -> &Arc<dyn Checker> {
        &self.checker
    }
}
