//! # BXT Control Unit
//!
//! Runs the strapping rig control core against a registered rig driver
//! (the simulation driver by default) until Ctrl-C or a tick limit.

use bxt_common::config::{ConfigError, LogLevel};
use bxt_control_unit::config::{LoadedConfig, load_config};
use bxt_control_unit::cycle::CycleRunner;
use bxt_hal::{DriverRegistry, MemoryLogbook};
use clap::Parser;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{Level, error, info};
use tracing_subscriber::EnvFilter;

/// BXT Control Unit - strapping test rig control loop
#[derive(Parser, Debug)]
#[command(name = "bxt_control_unit")]
#[command(author = "RTS007")]
#[command(version)]
#[command(about = "Cycle, timeout escalation and reset control for the BXT strapping test rig")]
struct Args {
    /// Path to the rig configuration TOML.
    #[arg(long, default_value = "config/rig.toml")]
    config: PathBuf,

    /// Rig driver to use.
    #[arg(long, default_value = "simulation")]
    driver: String,

    /// Start in Auto mode and run immediately.
    #[arg(long)]
    auto_start: bool,

    /// Stop after this many ticks.
    #[arg(long, value_name = "N")]
    max_ticks: Option<u64>,

    /// Enable verbose logging (DEBUG level).
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format.
    #[arg(long)]
    json: bool,
}

fn main() {
    let args = Args::parse();
    let loaded = load_config(&args.config);
    let log_level = loaded
        .as_ref()
        .map(|l| l.rig.shared.log_level)
        .unwrap_or_default();
    setup_tracing(&args, log_level);

    info!("BXT Control Unit v{} starting...", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(&args, loaded) {
        error!("FATAL: {e}");
        process::exit(1);
    }

    info!("BXT Control Unit shutdown complete");
}

fn run(
    args: &Args,
    loaded: Result<LoadedConfig, ConfigError>,
) -> Result<(), Box<dyn std::error::Error>> {
    let loaded = loaded?;
    info!(
        "Config OK for '{}' ({:?}): tick={:?}, cooling={} s, timeout estimate={} s",
        loaded.rig.shared.service_name,
        loaded.source,
        loaded.rig.timing.tick_period(),
        loaded.rig.timing.cooling_time_s,
        loaded.rig.timing.cycle_time_estimate_s,
    );

    let registry = DriverRegistry::with_builtin_drivers()?;
    let driver = registry.create_driver(&args.driver).inspect_err(|_| {
        let mut names = registry.list_drivers();
        names.sort_unstable();
        error!("Available drivers: {}", names.join(", "));
    })?;

    let mut runner = CycleRunner::new(&loaded, driver, MemoryLogbook::new())?;
    if args.auto_start {
        runner.start_auto();
    }

    // Setup signal handler for graceful shutdown.
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        info!("Received shutdown signal");
        r.store(false, Ordering::SeqCst);
    })?;

    info!("Entering control loop");
    runner.run(&running, args.max_ticks);

    for entry in runner.logbook().recent() {
        info!("{entry}");
    }
    runner.shutdown()?;
    Ok(())
}

/// Setup tracing subscriber based on CLI arguments and the configured level.
fn setup_tracing(args: &Args, log_level: LogLevel) {
    let level = if args.verbose {
        Level::DEBUG
    } else {
        log_level.as_directive().parse().unwrap_or(Level::INFO)
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    if args.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .compact()
            .init();
    }
}
