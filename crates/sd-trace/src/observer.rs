//! `TraceObserver<W>`: bridges `SimObserver` to a `TraceWriter`.

use sd_core::{SimConfig, Tick};
use sd_sim::{Delivery, SimObserver, TickStats};

use crate::row::{DeliveryRow, TickSummaryRow};
use crate::writer::TraceWriter;
use crate::{TraceError, TraceResult};

/// A [`SimObserver`] that writes every delivery, and a tick summary every
/// `trace_interval_ticks` ticks, to a [`TraceWriter`].
///
/// `SimObserver` methods cannot fail, so the first write error is stored and
/// later writes are skipped.  Check it with [`take_error`](Self::take_error)
/// after `sim.run()` returns.
pub struct TraceObserver<W: TraceWriter> {
    writer:           W,
    tick_duration_ms: u32,
    interval:         u64,
    pending:          Vec<DeliveryRow>,
    last_error:       Option<TraceError>,
}

impl<W: TraceWriter> TraceObserver<W> {
    pub fn new(writer: W, config: &SimConfig) -> Self {
        Self {
            writer,
            tick_duration_ms: config.tick_duration_ms,
            interval:         config.trace_interval_ticks,
            pending:          Vec::new(),
            last_error:       None,
        }
    }

    /// Take the stored write error, if any.
    pub fn take_error(&mut self) -> Option<TraceError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn wants_summary(&self, tick: Tick) -> bool {
        self.interval > 0 && tick.0 % self.interval == 0
    }

    fn store_err(&mut self, result: TraceResult<()>) {
        if let Err(e) = result {
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: TraceWriter> SimObserver for TraceObserver<W> {
    fn on_delivery(&mut self, delivery: &Delivery) {
        self.pending.push(DeliveryRow::from_delivery(delivery, self.tick_duration_ms));
    }

    fn on_tick_end(&mut self, tick: Tick, stats: &TickStats) {
        if self.last_error.is_some() {
            self.pending.clear();
            return;
        }
        if !self.pending.is_empty() {
            let rows = std::mem::take(&mut self.pending);
            let result = self.writer.write_deliveries(&rows);
            self.store_err(result);
        }
        if self.wants_summary(tick) {
            let row = TickSummaryRow::from_stats(stats, self.tick_duration_ms);
            let result = self.writer.write_tick_summary(&row);
            self.store_err(result);
        }
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
