//! Metrics collection and exposition.
//!
//! # Metrics
//! - `checker_registered` (gauge): checkers in the registry
//! - `checker_enabled` (gauge): 1=armed, 0=disarmed, per checker
//! - `checker_transitions_total` (counter): arm/disarm caused by address events
//! - `real_server_alive` (gauge): 1=alive, 0=failed, per real server
//!
//! # Design Decisions
//! - Recording is a no-op until a recorder is installed
//! - Prometheus exporter is opt-in via configuration

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

use crate::checker::CheckerId;

/// Install the Prometheus recorder and its HTTP listener.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_registered_checkers(count: usize) {
    metrics::gauge!("checker_registered").set(count as f64);
}

pub fn record_checker_armed(id: CheckerId, armed: bool) {
    metrics::gauge!("checker_enabled", "checker" => id.to_string()).set(if armed { 1.0 } else { 0.0 });
}

/// Zero the per-checker gauge of a checker that no longer exists.
pub fn forget_checker(id: CheckerId) {
    record_checker_armed(id, false);
}

pub fn record_checker_transition(armed: bool) {
    let direction = if armed { "activate" } else { "suspend" };
    metrics::counter!("checker_transitions_total", "direction" => direction).increment(1);
}

pub fn record_real_server_alive(addr: &SocketAddr, alive: bool) {
    metrics::gauge!("real_server_alive", "real_server" => addr.to_string())
        .set(if alive { 1.0 } else { 0.0 });
}
