//! Startup activation of every registered checker.

use std::time::Duration;

use rand::Rng;

use crate::checker::CheckerRegistry;
use crate::observability::metrics;
use crate::scheduler::{ScheduledLaunch, Scheduler};
use crate::topology::Topology;

/// Grace period before the first probe fires after startup.
pub const BOOTSTRAP_DELAY: Duration = Duration::from_secs(1);

/// `BOOTSTRAP_DELAY` plus a uniform random share of `jitter`.
pub fn bootstrap_delay(jitter: Duration) -> Duration {
    let jitter_ms = jitter.as_millis() as u64;
    if jitter_ms == 0 {
        return BOOTSTRAP_DELAY;
    }
    BOOTSTRAP_DELAY + Duration::from_millis(rand::thread_rng().gen_range(0..jitter_ms))
}

impl CheckerRegistry {
    /// Arm every checker and hand the launchable ones to `scheduler`.
    ///
    /// Runs once per registry generation, after registration and before any
    /// address event is applied. Returns the number of scheduled checkers.
    pub fn activate_all(
        &self,
        topology: &Topology,
        scheduler: &mut dyn Scheduler,
        jitter: Duration,
    ) -> usize {
        let mut scheduled = 0;

        for record in self.iter() {
            let rs = topology.real_server(record.real_server());
            tracing::info!(
                checker = %record.id(),
                "Activating healthchecker for service [{}]:{}",
                rs.addr().ip(),
                rs.addr().port()
            );
            record.set_enabled(true);
            metrics::record_checker_armed(record.id(), true);

            if record.checker().is_launchable() {
                scheduler.schedule_after(
                    bootstrap_delay(jitter),
                    ScheduledLaunch {
                        generation: self.generation(),
                        checker_id: record.id(),
                        real_server: record.real_server(),
                        enabled: record.arm_flag(),
                        checker: record.checker().clone(),
                        interval: topology.virtual_server(record.virtual_server()).delay_loop(),
                    },
                );
                scheduled += 1;
            }
        }

        scheduled
    }
}
