//! Checker daemon: the single control loop owning topology and registry.
//!
//! # Responsibilities
//! - Build the topology and register checkers from configuration
//! - Bootstrap-activate checkers on startup and after reload
//! - Apply address events and probe reports serially
//! - Cancel probes and release payloads on reload and shutdown

use std::time::Duration;

use tokio::sync::{broadcast, mpsc};

use crate::checker::CheckerRegistry;
use crate::config::TopologyConfig;
use crate::observability::metrics;
use crate::scheduler::{ProbeReport, Scheduler};
use crate::topology::builder::{build, BuildError};
use crate::topology::{AddressEvent, Topology};

/// Inputs of the control loop.
pub struct DaemonInputs {
    pub addresses: mpsc::UnboundedReceiver<AddressEvent>,
    pub reports: mpsc::UnboundedReceiver<ProbeReport>,
    pub config_updates: mpsc::UnboundedReceiver<TopologyConfig>,
    pub shutdown: broadcast::Receiver<()>,
}

pub struct Daemon<S: Scheduler> {
    config: TopologyConfig,
    /// Bumped on every successful reload.
    generation: u64,
    topology: Topology,
    registry: CheckerRegistry,
    scheduler: S,
}

fn new_registry(config: &TopologyConfig, generation: u64) -> CheckerRegistry {
    let mut registry = CheckerRegistry::new();
    registry.set_generation(generation);
    registry.set_log_address_events(config.global.log_address_events);
    registry
}

impl<S: Scheduler> Daemon<S> {
    /// Build the topology and register every configured checker.
    pub fn new(config: TopologyConfig, scheduler: S) -> Result<Self, BuildError> {
        let mut registry = new_registry(&config, 0);
        let topology = build(&config, &mut registry)?;

        Ok(Self {
            config,
            generation: 0,
            topology,
            registry,
            scheduler,
        })
    }

    pub fn registry(&self) -> &CheckerRegistry {
        &self.registry
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Dump the registry and arm every checker.
    pub fn start(&mut self) {
        self.registry.dump(&self.topology);
        let jitter = Duration::from_millis(self.config.global.bootstrap_jitter_ms);
        let scheduled = self
            .registry
            .activate_all(&self.topology, &mut self.scheduler, jitter);
        tracing::info!(scheduled, "Health checkers activated");
    }

    pub fn handle_address_event(&mut self, event: AddressEvent) -> usize {
        self.registry.apply_address_event(&self.topology, event)
    }

    /// Apply one probe result to its real server.
    ///
    /// Reports from a previous configuration generation are dropped. Ids and
    /// arena indices restart at zero on reload, so only the generation tells
    /// an old checker 0 apart from the current one.
    pub fn handle_report(&mut self, report: ProbeReport) {
        let current = report.generation == self.generation
            && self
                .registry
                .get(report.checker_id)
                .is_some_and(|r| r.real_server() == report.real_server);
        if !current {
            tracing::debug!(
                checker = %report.checker_id,
                generation = report.generation,
                current_generation = self.generation,
                "Dropping stale probe report"
            );
            return;
        }

        let success = report.outcome.is_success();
        let rs = self.topology.real_server_mut(report.real_server);
        let (addr, vs) = (rs.addr(), rs.virtual_server());
        let Some(alive) = rs.record_result(report.checker_id, success) else {
            return;
        };

        let service = self.topology.virtual_server(vs).service();
        if alive {
            tracing::info!(real_server = %addr, service = %service, "Real server is back up");
        } else {
            tracing::warn!(real_server = %addr, service = %service, "Real server is down");
        }
        metrics::record_real_server_alive(&addr, alive);
    }

    /// Replace the running topology with one built from `config`.
    ///
    /// The current topology keeps running if the new one fails to build.
    pub fn reload(&mut self, config: TopologyConfig) -> Result<(), BuildError> {
        let generation = self.generation + 1;
        let mut registry = new_registry(&config, generation);
        let topology = match build(&config, &mut registry) {
            Ok(topology) => topology,
            Err(e) => {
                // never registered with a scheduler; release right away
                registry.teardown_all();
                return Err(e);
            }
        };

        self.stop();
        self.generation = generation;
        self.config = config;
        self.topology = topology;
        self.registry = registry;
        self.start();
        Ok(())
    }

    /// Cancel every scheduled probe, then release every payload.
    pub fn stop(&mut self) {
        self.scheduler.cancel_all();
        self.registry.teardown_all();
    }

    /// Drive the control loop until shutdown.
    pub async fn run(mut self, mut inputs: DaemonInputs) {
        self.start();

        loop {
            tokio::select! {
                Some(event) = inputs.addresses.recv() => {
                    self.handle_address_event(event);
                }
                Some(report) = inputs.reports.recv() => {
                    self.handle_report(report);
                }
                Some(config) = inputs.config_updates.recv() => {
                    tracing::info!("Applying new configuration");
                    if let Err(e) = self.reload(config) {
                        tracing::error!(error = %e, "Reload failed, keeping current topology");
                    }
                }
                _ = inputs.shutdown.recv() => {
                    tracing::info!("Checker daemon received shutdown signal, exiting loop");
                    break;
                }
            }
        }

        self.stop();
    }
}
