//! `SimOutputObserver<W>`: bridges `SimObserver` to an `OutputWriter`.

use ob_core::RunConfig;
use ob_sim::{SimObserver, Snapshot, Tally};

use crate::row::{AgentRow, TallyRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes a tally row per step and agent snapshots to
/// any [`OutputWriter`] backend.
///
/// The tally series starts with the state before the first step.  Agent
/// snapshots (including the initial one) are only written when the run
/// config asks for them.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    snapshots:  bool,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W, config: &RunConfig) -> Self {
        Self {
            writer,
            snapshots:  config.snapshot_interval_steps > 0,
            last_error: None,
        }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn write_snapshot(&mut self, snapshot: &Snapshot) {
        let rows: Vec<AgentRow> = snapshot
            .agents
            .iter()
            .map(|view| AgentRow::new(snapshot.time, view))
            .collect();
        if !rows.is_empty() {
            let result = self.writer.write_agents(&rows);
            self.store_err(result);
        }
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_run_start(&mut self, snapshot: &Snapshot) {
        let result = self.writer.write_tally(&TallyRow::new(snapshot.time, &snapshot.tally()));
        self.store_err(result);
        if self.snapshots {
            self.write_snapshot(snapshot);
        }
    }

    fn on_step_end(&mut self, _step: u64, time: f64, tally: &Tally) {
        let result = self.writer.write_tally(&TallyRow::new(time, tally));
        self.store_err(result);
    }

    fn on_snapshot(&mut self, snapshot: &Snapshot) {
        self.write_snapshot(snapshot);
    }

    fn on_run_end(&mut self, _time: f64, _tally: &Tally) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
