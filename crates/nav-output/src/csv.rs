//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `trace.csv`
//! - `events.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::TraceWriter;
use crate::{EventRow, OutputResult, TraceRow};

pub const TRACE_HEADER: [&str; 8] =
    ["tick", "elapsed_ms", "lat", "lon", "segment_index", "progress_pct", "backward", "reroutes"];
pub const EVENT_HEADER: [&str; 3] = ["tick", "kind", "detail"];

/// Writes session output to two CSV files.
pub struct CsvTraceWriter {
    trace:    Writer<File>,
    events:   Writer<File>,
    finished: bool,
}

impl CsvTraceWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut trace = Writer::from_path(dir.join("trace.csv"))?;
        trace.write_record(TRACE_HEADER)?;

        let mut events = Writer::from_path(dir.join("events.csv"))?;
        events.write_record(EVENT_HEADER)?;

        Ok(Self { trace, events, finished: false })
    }
}

impl TraceWriter for CsvTraceWriter {
    fn write_trace(&mut self, row: &TraceRow) -> OutputResult<()> {
        self.trace.write_record(&[
            row.tick.to_string(),
            row.elapsed_ms.to_string(),
            format!("{:.7}", row.lat),
            format!("{:.7}", row.lon),
            row.segment_index.to_string(),
            format!("{:.2}", row.progress_pct),
            (row.backward as u8).to_string(),
            row.reroutes.to_string(),
        ])?;
        Ok(())
    }

    fn write_event(&mut self, row: &EventRow) -> OutputResult<()> {
        self.events.write_record(&[row.tick.to_string(), row.kind.to_owned(), row.detail.clone()])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.trace.flush()?;
        self.events.flush()?;
        Ok(())
    }
}
