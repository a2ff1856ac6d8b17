//! Tokio-backed scheduler: one task per scheduled checker.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time;

use crate::scheduler::{ProbeReport, ScheduledLaunch, Scheduler};

pub struct TokioScheduler {
    reports: mpsc::UnboundedSender<ProbeReport>,
    tasks: Vec<JoinHandle<()>>,
}

impl TokioScheduler {
    /// Create a scheduler that sends probe results to `reports`.
    pub fn new(reports: mpsc::UnboundedSender<ProbeReport>) -> Self {
        Self {
            reports,
            tasks: Vec::new(),
        }
    }

    /// Number of checker tasks still alive.
    pub fn active_tasks(&self) -> usize {
        self.tasks.iter().filter(|t| !t.is_finished()).count()
    }
}

impl Scheduler for TokioScheduler {
    fn schedule_after(&mut self, delay: Duration, launch: ScheduledLaunch) {
        let reports = self.reports.clone();
        let task = tokio::spawn(async move {
            time::sleep(delay).await;

            loop {
                if launch.enabled.is_armed() {
                    let outcome = launch.checker.probe().await;
                    let report = ProbeReport {
                        generation: launch.generation,
                        checker_id: launch.checker_id,
                        real_server: launch.real_server,
                        outcome,
                    };
                    if reports.send(report).is_err() {
                        tracing::debug!(checker = %launch.checker_id, "Report channel closed, stopping checker");
                        break;
                    }
                }
                time::sleep(launch.interval).await;
            }
        });
        self.tasks.push(task);
    }

    fn cancel_all(&mut self) {
        for task in self.tasks.drain(..) {
            task.abort();
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
