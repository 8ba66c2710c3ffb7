//! The `TraceWriter` trait implemented by output backends.

use crate::{EventRow, OutputResult, TraceRow};

/// Sink for per-tick trace rows and event rows.
///
/// All methods are infallible from the observer's perspective; errors are
/// stored internally and retrieved with
/// [`TraceObserver::take_error`][crate::TraceObserver::take_error].
pub trait TraceWriter {
    fn write_trace(&mut self, row: &TraceRow) -> OutputResult<()>;

    fn write_event(&mut self, row: &EventRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent; later calls are no-ops.
    fn finish(&mut self) -> OutputResult<()>;
}
