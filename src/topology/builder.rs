//! Build a topology and its checkers from configuration.

use std::time::Duration;

use thiserror::Error;

use crate::checker::CheckerRegistry;
use crate::config::{TopologyConfig, VirtualServerConfig};
use crate::probes::{build_checker, ProbeError};
use crate::topology::{ServiceKey, Topology, VirtualServer};

/// Errors building a topology from a configuration.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("virtual server #{0} needs exactly one of `address` or `fwmark`")]
    AmbiguousService(usize),

    #[error("checker for real server {real_server}: {source}")]
    Probe {
        real_server: std::net::SocketAddr,
        #[source]
        source: ProbeError,
    },
}

fn service_key(index: usize, vs: &VirtualServerConfig) -> Result<ServiceKey, BuildError> {
    match (vs.address, vs.fwmark) {
        (Some(addr), None) => Ok(ServiceKey::Inet(addr)),
        (None, Some(mark)) => Ok(ServiceKey::FirewallMark(mark)),
        _ => Err(BuildError::AmbiguousService(index)),
    }
}

/// Create every virtual server and real server of `config` and register one
/// checker per configured probe in `registry`.
///
/// Each checker is registered with the handles of the service and real server
/// it was configured under.
pub fn build(config: &TopologyConfig, registry: &mut CheckerRegistry) -> Result<Topology, BuildError> {
    let mut topology = Topology::new();

    for (index, vs_config) in config.virtual_servers.iter().enumerate() {
        let vs = topology.add_virtual_server(VirtualServer::new(
            service_key(index, vs_config)?,
            vs_config.alpha,
            Duration::from_secs(vs_config.delay_loop_secs),
        ));

        for rs_config in &vs_config.real_servers {
            let rs = topology.add_real_server(vs, rs_config.address, rs_config.weight);

            for checker_config in &rs_config.checkers {
                let checker = build_checker(checker_config, rs_config.address).map_err(|source| {
                    BuildError::Probe {
                        real_server: rs_config.address,
                        source,
                    }
                })?;
                registry.register(&mut topology, vs, rs, checker);
            }
        }
    }

    tracing::info!(
        virtual_servers = config.virtual_servers.len(),
        checkers = registry.len(),
        "Topology built"
    );
    Ok(topology)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::{ArmingPolicy, CheckerId};
    use crate::config::parse_config;
    use crate::topology::{RealServerId, VirtualServerId};

    const CONFIG: &str = r#"
        [[virtual_servers]]
        address = "10.0.0.5:80"
        alpha = true
        delay_loop_secs = 6
          [[virtual_servers.real_servers]]
          address = "192.168.1.10:80"
            [[virtual_servers.real_servers.checkers]]
            kind = "tcp"
          [[virtual_servers.real_servers]]
          address = "192.168.1.11:80"
            [[virtual_servers.real_servers.checkers]]
            kind = "tcp"
            [[virtual_servers.real_servers.checkers]]
            kind = "http"
            path = "/ping"

        [[virtual_servers]]
        fwmark = 42
          [[virtual_servers.real_servers]]
          address = "192.168.2.10:80"
          weight = 3
            [[virtual_servers.real_servers.checkers]]
            kind = "tcp"
    "#;

    #[test]
    fn test_build_registers_checkers_against_their_own_servers() {
        let config = parse_config(CONFIG).unwrap();
        let mut registry = CheckerRegistry::with_policy(ArmingPolicy::FailoverGoverned);
        let topology = build(&config, &mut registry).unwrap();

        let owners: Vec<_> = registry
            .iter()
            .map(|r| (r.id(), r.virtual_server(), r.real_server(), r.is_enabled()))
            .collect();
        assert_eq!(
            owners,
            vec![
                (CheckerId(0), VirtualServerId(0), RealServerId(0), false),
                (CheckerId(1), VirtualServerId(0), RealServerId(1), false),
                (CheckerId(2), VirtualServerId(0), RealServerId(1), false),
                (CheckerId(3), VirtualServerId(1), RealServerId(2), true),
            ]
        );

        let second = topology.real_server(RealServerId(1));
        assert_eq!(
            second.failed_checkers().iter().copied().collect::<Vec<_>>(),
            vec![CheckerId(1), CheckerId(2)]
        );
        assert!(topology.real_server(RealServerId(2)).failed_checkers().is_empty());
        assert_eq!(topology.virtual_server(VirtualServerId(0)).delay_loop(), Duration::from_secs(6));

        let weights: Vec<u32> = registry.snapshot(&topology).iter().map(|c| c.weight).collect();
        assert_eq!(weights, vec![1, 1, 1, 3]);
    }

    #[test]
    fn test_unvalidated_ambiguous_service_is_rejected() {
        let config: TopologyConfig = toml::from_str("[[virtual_servers]]\nalpha = true\n").unwrap();
        let mut registry = CheckerRegistry::new();
        assert!(matches!(
            build(&config, &mut registry),
            Err(BuildError::AmbiguousService(0))
        ));
    }
}
