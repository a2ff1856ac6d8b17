//! Checker lifecycle subsystem.
//!
//! # Data Flow
//! ```text
//! Topology builder
//!     → registry.rs register(vs, rs, payload)
//!         → id.rs (next identity)
//!         → policy.rs (initial arming + alpha marking)
//!
//! Startup:
//!     bootstrap.rs → arm every record → Scheduler::schedule_after
//!
//! Runtime:
//!     AddressEvent → sync.rs → arm / disarm matching records
//!     Scheduler task → ArmFlag::is_armed() → Checker::probe()
//!
//! Reload / shutdown:
//!     registry.rs teardown_all → Checker::release() → ids reset
//! ```
//!
//! # Design Decisions
//! - The arm flag is the only gate the scheduler consults
//! - All mutation happens on the control loop; probe tasks only read flags
//! - Payloads are opaque trait objects; the registry never inspects them

pub mod bootstrap;
pub mod capability;
pub mod id;
pub mod policy;
pub mod record;
pub mod registry;
pub mod sync;

#[cfg(test)]
pub(crate) mod testing;

pub use bootstrap::BOOTSTRAP_DELAY;
pub use capability::{Checker, ProbeOutcome};
pub use id::{CheckerId, IdAllocator};
pub use policy::ArmingPolicy;
pub use record::{ArmFlag, CheckerRecord};
pub use registry::{CheckerRegistry, CheckerSnapshot};
