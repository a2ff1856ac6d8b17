//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! registry, bootstrap, sync, daemon produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (gauges, counters)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Structured fields (`checker`, `real_server`, `address`) on every event
//! - Metrics are cheap (atomic updates) and optional

pub mod logging;
pub mod metrics;
