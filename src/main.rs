//! checkerd: health checker lifecycle daemon.
//!
//! # Architecture Overview
//!
//! ```text
//!   config file ──▶ config ──▶ topology::builder ──▶ CheckerRegistry
//!                                                        │
//!                                    bootstrap activation│
//!                                                        ▼
//!   address feed ──▶ AddressEvent ──▶ daemon ◀── ProbeReport ◀── TokioScheduler
//!                                       │                            ▲
//!                                       └── arm flags ───────────────┘
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use checkerd::checker::CheckerRegistry;
use checkerd::config::{load_config, watcher::ConfigWatcher};
use checkerd::daemon::{Daemon, DaemonInputs};
use checkerd::lifecycle::{signals, Shutdown, SignalEvent};
use checkerd::observability::{logging, metrics};
use checkerd::scheduler::TokioScheduler;
use checkerd::topology::{builder, AddressEvent};

#[derive(Parser)]
#[command(name = "checkerd")]
#[command(about = "Health checker lifecycle daemon", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "/etc/checkerd/checkerd.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the checker daemon
    Run {
        /// Read `add <ip>` / `del <ip>` address events from stdin
        #[arg(long)]
        events_from_stdin: bool,

        /// Reload when the config file changes
        #[arg(long)]
        watch: bool,
    },
    /// Print the registered checkers and exit
    Dump {
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(&cli.config)?;
    logging::init(&config.observability.log_level);

    match cli.command {
        Commands::Dump { json } => {
            let mut registry = CheckerRegistry::new();
            let topology = builder::build(&config, &mut registry)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&registry.snapshot(&topology))?);
            } else {
                for line in registry.describe(&topology) {
                    println!("{}", line);
                }
            }
            registry.teardown_all();
        }
        Commands::Run { events_from_stdin, watch } => {
            tracing::info!(config = ?cli.config, "checkerd v0.1.0 starting");

            if config.observability.metrics_enabled {
                if let Ok(addr) = config.observability.metrics_address.parse() {
                    metrics::init_metrics(addr);
                }
            }

            let shutdown = Shutdown::new();
            let (reports_tx, reports) = mpsc::unbounded_channel();
            let (address_tx, addresses) = mpsc::unbounded_channel();
            let (updates_tx, config_updates) = mpsc::unbounded_channel();

            // Keep the watcher alive for the lifetime of the daemon.
            let _watcher = if watch {
                Some(ConfigWatcher::new(&cli.config, updates_tx.clone()).run()?)
            } else {
                None
            };

            let mut signal_events = signals::spawn_signal_listener()?;
            let shutdown_tx = shutdown.clone();
            let config_path = cli.config.clone();
            tokio::spawn(async move {
                while let Some(event) = signal_events.recv().await {
                    match event {
                        SignalEvent::Shutdown => {
                            shutdown_tx.trigger();
                            break;
                        }
                        SignalEvent::Reload => match load_config(&config_path) {
                            Ok(config) => {
                                let _ = updates_tx.send(config);
                            }
                            Err(e) => {
                                tracing::error!("Failed to reload config: {}. Keeping current topology.", e);
                            }
                        },
                    }
                }
            });

            if events_from_stdin {
                tokio::spawn(async move {
                    let mut lines = BufReader::new(tokio::io::stdin()).lines();
                    while let Ok(Some(line)) = lines.next_line().await {
                        if line.trim().is_empty() {
                            continue;
                        }
                        match line.parse::<AddressEvent>() {
                            Ok(event) => {
                                if address_tx.send(event).is_err() {
                                    break;
                                }
                            }
                            Err(e) => tracing::warn!(error = %e, "Ignoring address event"),
                        }
                    }
                });
            }

            let daemon = Daemon::new(config, TokioScheduler::new(reports_tx))?;
            daemon
                .run(DaemonInputs {
                    addresses,
                    reports,
                    config_updates,
                    shutdown: shutdown.subscribe(),
                })
                .await;
        }
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
