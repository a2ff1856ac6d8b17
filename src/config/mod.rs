//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → TopologyConfig (validated, immutable)
//!     → topology::builder (services, real servers, checkers)
//!
//! On reload (file change or SIGHUP):
//!     watcher.rs detects change
//!     → loader.rs loads new config
//!     → validation.rs validates
//!     → daemon tears down the registry and rebuilds from the new config
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require full reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - A config that fails to load never replaces the running topology

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{
    CheckerConfig, GlobalConfig, HttpCheckConfig, ObservabilityConfig, RealServerConfig,
    TcpCheckConfig, TopologyConfig, VirtualServerConfig,
};
pub use validation::ValidationError;
