//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Every virtual server has exactly one identity (address or fwmark)
//! - Validate value ranges (intervals, timeouts, weights > 0)
//! - Real servers share the address family of their virtual server
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: TopologyConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::{CheckerConfig, TopologyConfig, VirtualServerConfig};

/// One semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("virtual server #{0} needs exactly one of `address` or `fwmark`")]
    AmbiguousService(usize),

    #[error("virtual server {0}: delay_loop_secs must be > 0")]
    ZeroDelayLoop(String),

    #[error("real server {0}: weight must be > 0")]
    ZeroWeight(SocketAddr),

    #[error("real server {real_server} is not in the address family of virtual server {service}")]
    FamilyMismatch { service: String, real_server: SocketAddr },

    #[error("real server {0}: {1} check connect_timeout_secs must be > 0")]
    ZeroTimeout(SocketAddr, &'static str),

    #[error("real server {0}: HTTP path {1:?} must start with a single '/'")]
    InvalidPath(SocketAddr, String),

    #[error("invalid metrics address {0:?}")]
    InvalidMetricsAddress(String),
}

fn service_label(index: usize, vs: &VirtualServerConfig) -> String {
    match (vs.address, vs.fwmark) {
        (Some(addr), _) => addr.to_string(),
        (None, Some(mark)) => format!("FWM {}", mark),
        (None, None) => format!("#{}", index),
    }
}

/// Check a parsed configuration for semantic errors.
pub fn validate_config(config: &TopologyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    for (index, vs) in config.virtual_servers.iter().enumerate() {
        let label = service_label(index, vs);

        if vs.address.is_some() == vs.fwmark.is_some() {
            errors.push(ValidationError::AmbiguousService(index));
        }
        if vs.delay_loop_secs == 0 {
            errors.push(ValidationError::ZeroDelayLoop(label.clone()));
        }

        for rs in &vs.real_servers {
            if rs.weight == 0 {
                errors.push(ValidationError::ZeroWeight(rs.address));
            }
            if let Some(vip) = vs.address {
                if vip.is_ipv4() != rs.address.is_ipv4() {
                    errors.push(ValidationError::FamilyMismatch {
                        service: label.clone(),
                        real_server: rs.address,
                    });
                }
            }

            for checker in &rs.checkers {
                if checker.connect_timeout_secs() == 0 {
                    errors.push(ValidationError::ZeroTimeout(rs.address, checker.kind()));
                }
                if let CheckerConfig::Http(http) = checker {
                    // "//host/x" would resolve against another authority
                    if !http.path.starts_with('/') || http.path.starts_with("//") {
                        errors.push(ValidationError::InvalidPath(rs.address, http.path.clone()));
                    }
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::loader::parse_config;

    #[test]
    fn test_valid_config_passes() {
        let config = parse_config(
            r#"
            [[virtual_servers]]
            address = "10.0.0.5:80"
            [[virtual_servers.real_servers]]
            address = "192.168.1.10:80"
            [[virtual_servers.real_servers.checkers]]
            kind = "http"
            path = "/health"
            "#,
        );
        assert!(config.is_ok());
    }

    #[test]
    fn test_collects_every_error() {
        let config: TopologyConfig = toml::from_str(
            r#"
            [[virtual_servers]]
            address = "10.0.0.5:80"
            fwmark = 3
            delay_loop_secs = 0
            [[virtual_servers.real_servers]]
            address = "[2001:db8::1]:80"
            weight = 0
            [[virtual_servers.real_servers.checkers]]
            kind = "http"
            path = "health"
            connect_timeout_secs = 0
            "#,
        )
        .unwrap();

        let errors = validate_config(&config).unwrap_err();
        let rs: SocketAddr = "[2001:db8::1]:80".parse().unwrap();
        assert_eq!(
            errors,
            vec![
                ValidationError::AmbiguousService(0),
                ValidationError::ZeroDelayLoop("10.0.0.5:80".into()),
                ValidationError::ZeroWeight(rs),
                ValidationError::FamilyMismatch {
                    service: "10.0.0.5:80".into(),
                    real_server: rs,
                },
                ValidationError::ZeroTimeout(rs, "http"),
                ValidationError::InvalidPath(rs, "health".into()),
            ]
        );
    }

    #[test]
    fn test_scheme_relative_path_is_rejected() {
        let config: TopologyConfig = toml::from_str(
            r#"
            [[virtual_servers]]
            address = "10.0.0.5:80"
            [[virtual_servers.real_servers]]
            address = "192.168.1.10:80"
            [[virtual_servers.real_servers.checkers]]
            kind = "http"
            path = "//other-host/x"
            "#,
        )
        .unwrap();

        let rs: SocketAddr = "192.168.1.10:80".parse().unwrap();
        assert_eq!(
            validate_config(&config),
            Err(vec![ValidationError::InvalidPath(rs, "//other-host/x".into())])
        );
    }

    #[test]
    fn test_missing_identity_is_rejected() {
        let config: TopologyConfig = toml::from_str("[[virtual_servers]]\nalpha = true\n").unwrap();
        assert_eq!(
            validate_config(&config),
            Err(vec![ValidationError::AmbiguousService(0)])
        );
    }

    #[test]
    fn test_bad_metrics_address_only_matters_when_enabled() {
        let mut config = TopologyConfig::default();
        config.observability.metrics_address = "nowhere".into();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        assert_eq!(
            validate_config(&config),
            Err(vec![ValidationError::InvalidMetricsAddress("nowhere".into())])
        );
    }
}
