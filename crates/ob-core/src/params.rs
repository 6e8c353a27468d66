//! Simulation parameters.
//!
//! [`Params`] holds the knobs a front-end exposes (arena size and the three
//! epidemic rates plus lockdown); [`RunConfig`] holds the batch-driving knobs
//! a headless runner needs (population, seed, step size, horizon).
//!
//! Both are plain data.  Validation is explicit via `validate()` so a config
//! deserialized from disk can be rejected before it reaches the simulator.

use crate::{ParamError, ParamResult};

// ── Range checks ──────────────────────────────────────────────────────────────

/// Accept `value` if it is finite and strictly positive.
pub fn check_positive(name: &'static str, value: f64) -> ParamResult<f64> {
    if !value.is_finite() {
        return Err(ParamError::NotFinite { name, value });
    }
    if value <= 0.0 {
        return Err(ParamError::OutOfRange { name, value, expected: "> 0" });
    }
    Ok(value)
}

/// Accept `value` if it lies in the closed unit interval.
pub fn check_fraction(name: &'static str, value: f64) -> ParamResult<f64> {
    if !value.is_finite() {
        return Err(ParamError::NotFinite { name, value });
    }
    if !(0.0..=1.0).contains(&value) {
        return Err(ParamError::OutOfRange { name, value, expected: "0..=1" });
    }
    Ok(value)
}

// ── Params ────────────────────────────────────────────────────────────────────

/// Arena and epidemic parameters.
///
/// Times are simulated seconds.  `simulation_speed` is not used by the event
/// loop itself; it scales wall-clock deltas in
/// `Simulator::step_wall_clock`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Params {
    /// Arena width `W`.  Set before populating.
    pub width: f64,

    /// Arena height `H`.  Set before populating.
    pub height: f64,

    /// Time from infection to outcome.
    pub duration: f64,

    /// Per-contact transmission probability.
    pub contagiousness: f64,

    /// Multiplier from wall-clock seconds to simulated seconds.
    pub simulation_speed: f64,

    /// Probability that an infection ends in death.
    pub lethality: f64,

    /// Fraction of the population forced to stay still.
    pub lockdown: f64,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            width:            400.0,
            height:           400.0,
            duration:         14.0,
            contagiousness:   0.6,
            simulation_speed: 1.0,
            lethality:        0.1,
            lockdown:         0.0,
        }
    }
}

impl Params {
    /// Check every field against its documented range.
    ///
    /// Reports the first offending field.
    pub fn validate(&self) -> ParamResult<()> {
        check_positive("width", self.width)?;
        check_positive("height", self.height)?;
        check_positive("duration", self.duration)?;
        check_fraction("contagiousness", self.contagiousness)?;
        check_positive("simulation_speed", self.simulation_speed)?;
        check_fraction("lethality", self.lethality)?;
        check_fraction("lockdown", self.lockdown)?;
        Ok(())
    }

    /// Centre of the arena; patient zero is the agent nearest to it.
    #[inline]
    pub fn center(&self) -> crate::Vec2 {
        crate::Vec2::new(self.width * 0.5, self.height * 0.5)
    }
}

// ── RunConfig ─────────────────────────────────────────────────────────────────

/// Configuration for a headless batch run.
///
/// Typically loaded from a JSON file by the application crate and passed to
/// `Simulator::run`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RunConfig {
    /// Requested number of agents.  Fewer may be placed in a crowded arena.
    pub population: usize,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Simulated seconds advanced by each `step` call.
    pub step_dt: f64,

    /// Simulated seconds to run for.
    pub total_time: f64,

    /// Emit a full snapshot every N steps.  0 disables snapshots; the tally
    /// is still reported every step.
    pub snapshot_interval_steps: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            population:              200,
            seed:                    42,
            step_dt:                 0.05,
            total_time:              60.0,
            snapshot_interval_steps: 0,
        }
    }
}

impl RunConfig {
    pub fn validate(&self) -> ParamResult<()> {
        check_positive("step_dt", self.step_dt)?;
        check_positive("total_time", self.total_time)?;
        Ok(())
    }

    /// Number of `step_dt` steps needed to reach `total_time` (rounds up, so
    /// the run never stops short of the horizon).
    pub fn step_count(&self) -> u64 {
        (self.total_time / self.step_dt).ceil() as u64
    }
}
