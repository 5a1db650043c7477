//! `sd-trace` — delivery trace output for the systemic-design stimulus engine.
//!
//! | Backend | Files created                             |
//! |---------|-------------------------------------------|
//! | CSV     | `deliveries.csv`, `tick_summaries.csv`    |
//!
//! Backends implement [`TraceWriter`] and are driven by [`TraceObserver`],
//! which implements `sd_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use sd_trace::{CsvTraceWriter, TraceObserver};
//!
//! let writer = CsvTraceWriter::new(Path::new("./trace"))?;
//! let mut obs = TraceObserver::new(writer, &sim.world.config.sim);
//! sim.run(&mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("trace error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

pub use csv::CsvTraceWriter;
pub use error::{TraceError, TraceResult};
pub use observer::TraceObserver;
pub use row::{DeliveryRow, TickSummaryRow};
pub use writer::TraceWriter;
