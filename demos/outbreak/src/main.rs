//! outbreak: command-line driver for the rust_outbreak arena simulator.
//!
//! Places a population of discs in a box, infects the one nearest the
//! centre, and lets collisions spread the disease.  Writes `tally.csv` (and
//! optionally `agents.csv`) to the output directory and prints a summary.
//!
//! ```text
//! outbreak --population 300 --contagiousness 0.8 --lockdown 0.5 -o out/
//! outbreak --config scenario.json -v
//! ```

mod scenario;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;

use ob_agent::HealthState;
use ob_output::{CsvWriter, OutputWriter, SimOutputObserver};
use ob_sim::{SimBuilder, SimObserver, Snapshot, Tally};

use scenario::Scenario;

// ── Command line ──────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "outbreak", about = "Event-driven epidemic among bouncing discs")]
struct Cli {
    /// JSON scenario file; flags below override its values.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory for the CSV output.
    #[arg(short, long, default_value = "output")]
    output: PathBuf,

    /// Number of agents to place.
    #[arg(short = 'n', long)]
    population: Option<usize>,

    #[arg(long)]
    seed: Option<u64>,

    /// Simulated seconds to run for.
    #[arg(short, long)]
    time: Option<f64>,

    /// Simulated seconds per step.
    #[arg(long)]
    step: Option<f64>,

    #[arg(long)]
    contagiousness: Option<f64>,

    #[arg(long)]
    lethality: Option<f64>,

    /// Infection length in simulated seconds.
    #[arg(long)]
    duration: Option<f64>,

    /// Fraction of agents held still.
    #[arg(long)]
    lockdown: Option<f64>,

    /// Write every agent's position every N steps (0 = never).
    #[arg(long)]
    snapshot_every: Option<u64>,

    /// Raise log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn scenario(&self) -> Result<Scenario> {
        let mut scenario = match &self.config {
            Some(path) => Scenario::load(path)?,
            None => Scenario::default(),
        };

        let run = &mut scenario.run;
        if let Some(n) = self.population { run.population = n; }
        if let Some(s) = self.seed { run.seed = s; }
        if let Some(t) = self.time { run.total_time = t; }
        if let Some(dt) = self.step { run.step_dt = dt; }
        if let Some(k) = self.snapshot_every { run.snapshot_interval_steps = k; }

        let params = &mut scenario.params;
        if let Some(c) = self.contagiousness { params.contagiousness = c; }
        if let Some(l) = self.lethality { params.lethality = l; }
        if let Some(d) = self.duration { params.duration = d; }
        if let Some(f) = self.lockdown { params.lockdown = f; }

        scenario.validate()?;
        Ok(scenario)
    }
}

// ── Progress observer ─────────────────────────────────────────────────────────

/// Wraps the CSV observer and prints a line whenever a new day starts.
struct DailyReport<W: OutputWriter> {
    inner:    SimOutputObserver<W>,
    last_day: u64,
    peak:     (usize, f64),
}

impl<W: OutputWriter> DailyReport<W> {
    fn new(inner: SimOutputObserver<W>) -> Self {
        Self { inner, last_day: 0, peak: (0, 0.0) }
    }
}

impl<W: OutputWriter> SimObserver for DailyReport<W> {
    fn on_run_start(&mut self, snapshot: &Snapshot) {
        println!("day   0: {}", snapshot.tally());
        self.inner.on_run_start(snapshot);
    }

    fn on_step_end(&mut self, step: u64, time: f64, tally: &Tally) {
        if tally.infected > self.peak.0 {
            self.peak = (tally.infected, time);
        }
        let day = time.floor() as u64;
        if day > self.last_day {
            self.last_day = day;
            println!("day {day:>3}: {tally}");
        }
        self.inner.on_step_end(step, time, tally);
    }

    fn on_snapshot(&mut self, snapshot: &Snapshot) {
        self.inner.on_snapshot(snapshot);
    }

    fn on_run_end(&mut self, time: f64, tally: &Tally) {
        self.inner.on_run_end(time, tally);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

    let scenario = cli.scenario()?;
    let run = &scenario.run;

    println!("=== outbreak: event-driven epidemic arena ===");
    println!(
        "Arena: {}x{}  |  Agents: {}  |  Seed: {}  |  Time: {} s",
        scenario.params.width, scenario.params.height, run.population, run.seed, run.total_time,
    );
    println!(
        "Contagiousness: {}  |  Duration: {} s  |  Lethality: {}  |  Lockdown: {}",
        scenario.params.contagiousness,
        scenario.params.duration,
        scenario.params.lethality,
        scenario.params.lockdown,
    );
    println!();

    let mut sim = SimBuilder::new()
        .params(scenario.params.clone())
        .placement(scenario.placement.clone())
        .run_config(run)
        .build()
        .context("building simulator")?;
    if sim.agent_count() < run.population {
        log::warn!("placed only {} of {} agents (arena too crowded)", sim.agent_count(), run.population);
    }

    let writer = CsvWriter::new(&cli.output)
        .with_context(|| format!("opening output directory {}", cli.output.display()))?;
    let mut observer = DailyReport::new(SimOutputObserver::new(writer, run));

    let started = Instant::now();
    sim.run(run, &mut observer).context("simulation failed")?;
    let elapsed = started.elapsed();
    log::info!("run finished after {} steps", run.step_count());

    if let Some(e) = observer.inner.take_error() {
        return Err(e).context("writing output");
    }

    let tally = sim.tally();
    println!();
    println!("=== Summary ===");
    println!("Simulated {:.1} s in {:.2?}", sim.current_time(), elapsed);
    println!("Peak infected: {} at t={:.1}", observer.peak.0, observer.peak.1);
    for state in HealthState::ALL {
        println!(
            "  {:<12} {:>6}  ({:>5.1}%)",
            state.to_string(),
            tally.get(state),
            100.0 * tally.fraction(state),
        );
    }
    println!("Output written to {}", cli.output.display());
    Ok(())
}
