//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (daemon.rs):
//!     Load config → Validate → Build topology → Register checkers
//!     → Bootstrap activation → Control loop
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Cancel scheduled probes → Tear down registry → Exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//!     SIGHUP → Trigger config reload
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then topology, then probes
//! - Probes are cancelled before their payloads are released

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
pub use signals::SignalEvent;
