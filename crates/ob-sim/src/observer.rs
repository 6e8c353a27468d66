//! Simulation observer trait for progress reporting and data collection.

use ob_epidemic::Transition;
use ob_event::Event;

use crate::{Snapshot, Tally};

/// Callbacks invoked by [`Simulator::run`][crate::Simulator::run] and
/// [`Simulator::step_observed`][crate::Simulator::step_observed].
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: daily printer
///
/// ```rust
/// use ob_sim::{SimObserver, Tally};
///
/// struct Daily { last_day: u64 }
///
/// impl SimObserver for Daily {
///     fn on_step_end(&mut self, _step: u64, time: f64, tally: &Tally) {
///         let day = time.floor() as u64;
///         if day > self.last_day {
///             self.last_day = day;
///             println!("day {day}: {tally}");
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called once by `run`, before the first step.
    fn on_run_start(&mut self, _snapshot: &Snapshot) {}

    /// Called for every event the step loop resolves, after agents have been
    /// advanced to the event time and before the reflection.
    fn on_event(&mut self, _event: &Event) {}

    /// Called for every health-state change, in the order they happen.
    fn on_transition(&mut self, _transition: &Transition) {}

    /// Called by `run` after each step, with 1-based step numbers.
    fn on_step_end(&mut self, _step: u64, _time: f64, _tally: &Tally) {}

    /// Called by `run` every `snapshot_interval_steps` steps.
    fn on_snapshot(&mut self, _snapshot: &Snapshot) {}

    /// Called once after the final step of `run`.
    fn on_run_end(&mut self, _time: f64, _tally: &Tally) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
