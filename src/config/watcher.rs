//! Configuration file watcher for hot reload.
//!
//! Editors usually save in several steps (truncate, write, rename), so file
//! events are coalesced for [`DEBOUNCE`] before the file is read once.

use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tokio::time;

use crate::config::loader::load_config;
use crate::config::schema::TopologyConfig;

/// Quiet period after the last file event before the file is reloaded.
pub const DEBOUNCE: Duration = Duration::from_millis(500);

/// Turns configuration file changes into validated topology updates.
pub struct ConfigWatcher {
    path: PathBuf,
    updates: mpsc::UnboundedSender<TopologyConfig>,
    debounce: Duration,
}

impl ConfigWatcher {
    /// Watch `path` and send every valid new configuration to `updates`.
    pub fn new(path: &Path, updates: mpsc::UnboundedSender<TopologyConfig>) -> Self {
        Self {
            path: path.to_path_buf(),
            updates,
            debounce: DEBOUNCE,
        }
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Start watching the file. Keep the returned watcher alive for as long as
    /// updates are wanted.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let (changed_tx, changed_rx) = mpsc::unbounded_channel();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) if event.kind.is_modify() || event.kind.is_create() => {
                    let _ = changed_tx.send(());
                }
                Ok(_) => {}
                Err(e) => tracing::error!(error = %e, "Config watch error"),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;
        watcher.watch(&self.path, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.path, "Watching checker configuration");
        tokio::spawn(self.forward_changes(changed_rx));
        Ok(watcher)
    }

    /// Reload once per burst of change notifications.
    async fn forward_changes(self, mut changed: mpsc::UnboundedReceiver<()>) {
        while changed.recv().await.is_some() {
            time::sleep(self.debounce).await;
            while changed.try_recv().is_ok() {}

            match load_config(&self.path) {
                Ok(config) => {
                    let checkers: usize = config
                        .virtual_servers
                        .iter()
                        .flat_map(|vs| &vs.real_servers)
                        .map(|rs| rs.checkers.len())
                        .sum();
                    tracing::info!(
                        virtual_servers = config.virtual_servers.len(),
                        checkers,
                        "Checker configuration changed, staging topology reload"
                    );
                    if self.updates.send(config).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::error!(
                        path = ?self.path,
                        error = %e,
                        "Changed configuration rejected, current checkers keep running"
                    );
                }
            }
        }
    }
}
