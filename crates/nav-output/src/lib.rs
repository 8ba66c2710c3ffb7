//! `nav-output` — session trace output.
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`row`]      | `TraceRow` (per tick), `EventRow` (per event)              |
//! | [`writer`]   | `TraceWriter` backend trait                                |
//! | [`csv`]      | `CsvTraceWriter` → `trace.csv`, `events.csv`               |
//! | [`trail`]    | `Trail`, the bounded movement history                      |
//! | [`observer`] | `TraceObserver`, a `nav_sim::NavObserver`                  |
//!
//! # Usage
//!
//! ```rust,ignore
//! use nav_output::{CsvTraceWriter, TraceObserver};
//!
//! let writer = CsvTraceWriter::new(Path::new("./output"))?;
//! let mut obs = TraceObserver::new(writer, &config);
//! session.navigate(start, end, &mut obs).await?;
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod trail;
pub mod writer;


pub use csv::CsvTraceWriter;
pub use error::{OutputError, OutputResult};
pub use observer::TraceObserver;
pub use row::{EventRow, TraceRow};
pub use trail::Trail;
pub use writer::TraceWriter;
