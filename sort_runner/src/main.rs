use anyhow::{Context, Result};
use clap::Parser;
use color_sorter::{Command, Simulation, SortColor, SorterConfig, TickReport};
use std::io::BufRead;
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::{Level, debug, info, warn};
use tracing_subscriber::EnvFilter;

/// Ticks between periodic summary lines at the default log level.
const SUMMARY_EVERY: u64 = 100;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON config file. Defaults are used when it does not exist.
    #[arg(short, long, default_value = "sorter.json")]
    config: PathBuf,

    /// Stop after this many ticks instead of waiting for `q`
    #[arg(long)]
    ticks: Option<u64>,

    /// Seed for the synthetic camera and the spawner
    #[arg(long)]
    seed: Option<u64>,

    /// Initial sort target (red, green or blue). Overrides the config file.
    #[arg(short, long)]
    target: Option<SortColor>,

    /// Log every tick
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(rust_log.as_deref(), verbose))
        .with_target(false)
        .init();
}

/// `RUST_LOG` wins when it is set and parses; otherwise `--verbose` picks the level.
fn log_filter(rust_log: Option<&str>, verbose: bool) -> EnvFilter {
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| {
            let default_level = if verbose { Level::DEBUG } else { Level::INFO };
            EnvFilter::default().add_directive(default_level.into())
        })
}

fn limit_reached(limit: Option<u64>, ticks: u64) -> bool {
    limit.is_some_and(|limit| ticks >= limit)
}

#[tokio::main]
async fn main() -> Result<()> {
    // --- 1. Argument Parsing & Setup ---
    let args = Args::parse();
    init_logging(args.verbose);

    let mut config = SorterConfig::load(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;
    if let Some(target) = args.target {
        config.initial_target = target;
    }

    // --- 2. Simulation Initialization ---
    let mut sim = Simulation::synthetic(&config, args.seed);

    // --- 3. Command Intake ---
    let (command_tx, mut command_rx) = mpsc::unbounded_channel();
    spawn_stdin_reader(command_tx.clone());
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = command_tx.send(Command::Stop);
        }
    });

    info!(
        target_color = %config.initial_target,
        interval_ms = config.tick_interval_ms,
        "Starting automated sorting system. Commands: r, g, b, q"
    );

    // --- 4. Main Tick Loop ---
    let mut interval = tokio::time::interval(Duration::from_millis(config.tick_interval_ms.max(1)));
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    while sim.is_running() {
        if limit_reached(args.ticks, sim.controller().ticks()) {
            info!(ticks = sim.controller().ticks(), "tick limit reached");
            break;
        }
        interval.tick().await;

        // Commands only ever land between ticks.
        while let Ok(command) = command_rx.try_recv() {
            sim.apply(command);
        }
        if !sim.is_running() {
            break;
        }

        match sim.step() {
            Ok(report) => log_report(&report),
            Err(e) => warn!(error = %e, "skipping tick with malformed frame"),
        }
    }

    let controller = sim.controller();
    println!(
        "Processing complete after {} ticks. Sorted: {}",
        controller.ticks(),
        controller.tally()
    );
    Ok(())
}

/// Reads commands from stdin on a plain thread so a pending read never holds up
/// runtime shutdown.
fn spawn_stdin_reader(tx: mpsc::UnboundedSender<Command>) {
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if line.trim().is_empty() {
                continue;
            }
            match line.parse::<Command>() {
                Ok(command) => {
                    if tx.send(command).is_err() {
                        break;
                    }
                }
                Err(e) => warn!("{e}"),
            }
        }
    });
}

fn log_report(report: &TickReport) {
    debug!("{}", status_line(report));
    if report.tick % SUMMARY_EVERY == 0 {
        info!("{}", status_line(report));
    }
}

/// One-line text rendering of a tick, in place of a drawn frame.
fn status_line(report: &TickReport) -> String {
    let objects: Vec<String> = report
        .live_tokens
        .iter()
        .map(|token| format!("#{} {} @ {:.1}", token.id, token.color, token.position))
        .collect();
    format!(
        "tick {} | target {} | seen {} | gate {:.2} ({:?}) | objects [{}] | sorted {}",
        report.tick,
        report.target,
        report.detected,
        report.gate_position,
        report.gate_motion,
        objects.join(", "),
        report.tally
    )
}
