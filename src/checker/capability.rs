//! Capability set every probe payload implements.

use std::fmt;

use futures_util::future::BoxFuture;

/// Result of one probe cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Success,
    Failure(String),
}

impl ProbeOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ProbeOutcome::Success)
    }
}

/// A concrete health probe (TCP, HTTP, ...) as seen by the registry.
///
/// The registry only launches, describes and releases payloads; what a probe
/// actually checks is up to the implementation.
pub trait Checker: Send + Sync + fmt::Debug {
    /// Short name of the probe kind, e.g. `"tcp"`.
    fn kind(&self) -> &'static str;

    /// Whether the scheduler should ever launch this checker.
    fn is_launchable(&self) -> bool {
        true
    }

    /// Run one probe cycle.
    fn probe(&self) -> BoxFuture<'_, ProbeOutcome>;

    /// Human-readable description, one entry per line.
    fn describe(&self) -> Vec<String>;

    /// Release resources held by the payload. Called exactly once, at
    /// registry teardown.
    fn release(&self) {}
}
