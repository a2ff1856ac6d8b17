//! Health checker lifecycle registry and daemon library.

pub mod checker;
pub mod config;
pub mod daemon;
pub mod lifecycle;
pub mod observability;
pub mod probes;
pub mod scheduler;
pub mod topology;

pub use checker::{CheckerRegistry, BOOTSTRAP_DELAY};
pub use config::TopologyConfig;
pub use daemon::Daemon;
pub use topology::Topology;
