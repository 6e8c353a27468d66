//! The `OutputWriter` trait implemented by backend writers.

use crate::{AgentRow, OutputResult, TallyRow};

/// Sink for simulation time series.
///
/// Errors are stored by [`SimOutputObserver`][crate::SimOutputObserver] and
/// retrieved with its `take_error`.
pub trait OutputWriter {
    /// Write every agent of one snapshot.
    fn write_agents(&mut self, rows: &[AgentRow]) -> OutputResult<()>;

    /// Write one tally row.
    fn write_tally(&mut self, row: &TallyRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
