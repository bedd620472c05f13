//! headless: the flock simulator without a renderer.
//!
//! Runs `config.total_ticks` ticks, feeds a fixed key script into the
//! population controls (`a` adds an agent, `r` removes a random one), prints
//! the octant readout once a second of simulated time and writes CSV output
//! to `output/headless`.
//!
//! ```text
//! cargo run -p headless --release -- [config.json]
//! RUST_LOG=flock_sim=debug cargo run -p headless
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use flock_agent::AgentStore;
use flock_core::{FlockConfig, Tick};
use flock_output::{CsvWriter, OutputWriter, SimOutputObserver};
use flock_sim::{PopulationCommand, SimBuilder, SimObserver, TickReport};

// ── Constants ─────────────────────────────────────────────────────────────────

const OUTPUT_DIR:     &str = "output/headless";
const READOUT_EVERY:  u64  = 60; // one simulated second at the default dt

/// Key presses by tick.  Several presses in one tick still add or remove at
/// most one agent.
const KEY_SCRIPT: &[(u64, char)] = &[
    (30, 'a'),
    (30, 'a'),
    (90, 'a'),
    (150, 'a'),
    (240, 'r'),
    (300, 'a'),
    (300, 'r'),
    (420, 'r'),
];

fn command_for(key: char) -> Option<PopulationCommand> {
    match key {
        'a' => Some(PopulationCommand::AddAgent),
        'r' => Some(PopulationCommand::RemoveRandomAgent),
        _ => None,
    }
}

// ── Readout ───────────────────────────────────────────────────────────────────

/// Prints the diagnostic readout and forwards everything to the CSV observer.
struct Readout<W: OutputWriter> {
    inner:    SimOutputObserver<W>,
    ticks:    u64,
    rejected: usize,
}

impl<W: OutputWriter> Readout<W> {
    fn new(inner: SimOutputObserver<W>) -> Self {
        Self { inner, ticks: 0, rejected: 0 }
    }
}

impl<W: OutputWriter> SimObserver for Readout<W> {
    fn on_tick_end(&mut self, report: &TickReport) {
        self.ticks += 1;
        self.rejected += report.rejected;
        if report.tick.0 % READOUT_EVERY == 0 {
            println!("[{}] instance num: {}", report.tick, report.population);
            println!("{}", report.octants);
        }
        self.inner.on_tick_end(report);
    }

    fn on_snapshot(&mut self, tick: Tick, agents: &AgentStore) {
        self.inner.on_snapshot(tick, agents);
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.inner.on_sim_end(final_tick);
    }
}

fn load_config(path: Option<PathBuf>) -> Result<FlockConfig> {
    let Some(path) = path else {
        return Ok(FlockConfig::default());
    };
    let text = fs::read_to_string(&path)
        .with_context(|| format!("reading config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = load_config(std::env::args_os().nth(1).map(PathBuf::from))?;
    println!("=== headless flock ===");
    println!(
        "Agents: {}  |  Ticks: {}  |  dt: {:.4} s  |  Seed: {}",
        config.initial_population, config.total_ticks, config.dt, config.seed
    );
    println!();

    let total_ticks = config.total_ticks;
    let mut sim = SimBuilder::new(config).build()?;

    let writer = CsvWriter::new(Path::new(OUTPUT_DIR))?;
    let mut obs = Readout::new(SimOutputObserver::new(writer));

    let t0 = Instant::now();
    while sim.clock.current_tick.0 < total_ticks {
        let now = sim.clock.current_tick.0;
        for &(_, key) in KEY_SCRIPT.iter().filter(|(tick, _)| *tick == now) {
            if let Some(command) = command_for(key) {
                sim.request(command);
            }
        }
        sim.run_ticks(1, &mut obs);
    }
    obs.on_sim_end(sim.clock.current_tick);
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        eprintln!("output error: {e}");
    }

    println!();
    println!("Simulation complete in {:.3} s ({} ticks)", elapsed.as_secs_f64(), obs.ticks);
    println!("  final population  : {}", sim.population());
    println!("  rejected commands : {}", obs.rejected);
    println!("  simulated time    : {}", sim.clock);
    println!("  output            : {OUTPUT_DIR}/");
    println!();
    println!("{}", sim.octants());

    Ok(())
}
