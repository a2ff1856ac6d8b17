//! Probe scheduling.
//!
//! # Data Flow
//! ```text
//! checker::bootstrap
//!     → Scheduler::schedule_after(delay, ScheduledLaunch)
//!     → tokio_timer.rs spawns one task per checker
//!         → sleep(delay)
//!         → loop { if armed: probe → ProbeReport } every delay_loop
//!     → control loop applies ProbeReport to the real server
//! ```
//!
//! # Design Decisions
//! - The scheduler checks the arm flag before every launch; nothing else gates
//! - In-flight probes are never interrupted by disarming
//! - Reports flow back over a channel so only the control loop mutates state

pub mod tokio_timer;

pub use tokio_timer::TokioScheduler;

use std::sync::Arc;
use std::time::Duration;

use crate::checker::{ArmFlag, Checker, CheckerId, ProbeOutcome};
use crate::topology::RealServerId;

/// Everything a scheduler needs to drive one checker.
#[derive(Debug, Clone)]
pub struct ScheduledLaunch {
    /// Registry generation the checker belongs to.
    pub generation: u64,
    pub checker_id: CheckerId,
    pub real_server: RealServerId,
    pub enabled: ArmFlag,
    pub checker: Arc<dyn Checker>,
    /// Interval between probe cycles after the first one.
    pub interval: Duration,
}

/// Outcome of one probe cycle, routed back to the control loop.
#[derive(Debug, Clone)]
pub struct ProbeReport {
    pub generation: u64,
    pub checker_id: CheckerId,
    pub real_server: RealServerId,
    pub outcome: ProbeOutcome,
}

/// Timer service that runs checkers.
pub trait Scheduler {
    /// Start running `launch` after `delay`.
    fn schedule_after(&mut self, delay: Duration, launch: ScheduledLaunch);

    /// Stop every scheduled checker. Probes already running may finish but
    /// no new probe starts.
    fn cancel_all(&mut self);
}
