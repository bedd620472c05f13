//! The `OutputWriter` trait implemented by backend writers.

use crate::{AgentSnapshotRow, OctantCountRow, OutputResult};

/// Sink for per-tick octant readouts and periodic agent snapshots.
///
/// Errors surface through [`SimOutputObserver::take_error`][crate::SimOutputObserver::take_error]
/// when driven by the observer.
pub trait OutputWriter {
    /// Write a batch of agent snapshots.
    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()>;

    /// Write one octant readout row.
    fn write_octant_counts(&mut self, row: &OctantCountRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent; safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
