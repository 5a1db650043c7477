//! CSV trace backend.
//!
//! Creates two files in the configured directory:
//! - `deliveries.csv`
//! - `tick_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::TraceWriter;
use crate::{DeliveryRow, TickSummaryRow, TraceResult};

pub const DELIVERY_HEADERS: [&str; 7] =
    ["tick", "elapsed_ms", "entity", "component", "kind", "stimulus", "channel"];

pub const SUMMARY_HEADERS: [&str; 7] = [
    "tick",
    "elapsed_ms",
    "timers_fired",
    "overlap_events",
    "deliveries",
    "commands_applied",
    "particles_alive",
];

/// Writes the delivery trace to two CSV files.
pub struct CsvTraceWriter {
    deliveries: Writer<File>,
    summaries:  Writer<File>,
    finished:   bool,
}

impl CsvTraceWriter {
    /// Create `dir` if needed, open both files and write the header rows.
    pub fn new(dir: &Path) -> TraceResult<Self> {
        std::fs::create_dir_all(dir)?;

        let mut deliveries = Writer::from_path(dir.join("deliveries.csv"))?;
        deliveries.write_record(DELIVERY_HEADERS)?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record(SUMMARY_HEADERS)?;

        Ok(Self { deliveries, summaries, finished: false })
    }
}

impl TraceWriter for CsvTraceWriter {
    fn write_deliveries(&mut self, rows: &[DeliveryRow]) -> TraceResult<()> {
        for row in rows {
            self.deliveries.write_record([
                row.tick.to_string().as_str(),
                row.elapsed_ms.to_string().as_str(),
                row.entity.to_string().as_str(),
                row.component.to_string().as_str(),
                row.kind,
                row.stimulus.as_str(),
                row.channel,
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> TraceResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.elapsed_ms.to_string(),
            row.timers_fired.to_string(),
            row.overlap_events.to_string(),
            row.deliveries.to_string(),
            row.commands_applied.to_string(),
            row.particles_alive.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> TraceResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.deliveries.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
