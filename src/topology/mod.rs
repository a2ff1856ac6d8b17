//! Service topology: virtual servers and their real servers.
//!
//! # Data Flow
//! ```text
//! TopologyConfig (validated)
//!     → builder.rs (create virtual servers, then real servers)
//!     → register one checker per configured probe
//!     → Topology arena + CheckerRegistry
//!
//! Address ownership events:
//!     reflector feed → address.rs (AddressEvent)
//!     → checker::sync (re-arm / disarm matching checkers)
//! ```
//!
//! # Design Decisions
//! - Topology is an arena; checkers hold ids, never owning pointers
//! - Virtual servers are identified either by socket address or firewall mark
//! - Real server health is derived from its failed checker set

pub mod address;
pub mod builder;
pub mod real_server;
pub mod virtual_server;

pub use address::AddressEvent;
pub use real_server::{RealServer, RealServerId};
pub use virtual_server::{ServiceKey, VirtualServer, VirtualServerId};

use std::net::SocketAddr;

/// Arena owning every virtual server and real server of one configuration
/// generation.
#[derive(Debug, Default)]
pub struct Topology {
    virtual_servers: Vec<VirtualServer>,
    real_servers: Vec<RealServer>,
}

impl Topology {
    /// Create an empty topology.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a virtual server and return its handle.
    pub fn add_virtual_server(&mut self, vs: VirtualServer) -> VirtualServerId {
        let id = VirtualServerId(self.virtual_servers.len());
        self.virtual_servers.push(vs);
        id
    }

    /// Add a real server behind `vs` and return its handle.
    ///
    /// Panics if `vs` does not belong to this topology.
    pub fn add_real_server(
        &mut self,
        vs: VirtualServerId,
        addr: SocketAddr,
        weight: u32,
    ) -> RealServerId {
        let id = RealServerId(self.real_servers.len());
        self.virtual_server_mut(vs).real_servers.push(id);
        self.real_servers.push(RealServer::new(vs, addr, weight));
        id
    }

    pub fn virtual_server(&self, id: VirtualServerId) -> &VirtualServer {
        &self.virtual_servers[id.0]
    }

    fn virtual_server_mut(&mut self, id: VirtualServerId) -> &mut VirtualServer {
        &mut self.virtual_servers[id.0]
    }

    pub fn real_server(&self, id: RealServerId) -> &RealServer {
        &self.real_servers[id.0]
    }

    pub fn real_server_mut(&mut self, id: RealServerId) -> &mut RealServer {
        &mut self.real_servers[id.0]
    }

    /// Whether `id` was issued by this topology.
    pub fn contains_real_server(&self, id: RealServerId) -> bool {
        id.0 < self.real_servers.len()
    }
}
