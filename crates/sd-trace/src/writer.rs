//! The `TraceWriter` trait implemented by trace backends.

use crate::{DeliveryRow, TickSummaryRow, TraceResult};

/// A sink for delivery rows and tick summaries.
///
/// Errors are stored by [`TraceObserver`](crate::TraceObserver) and
/// retrieved with [`take_error`](crate::TraceObserver::take_error).
pub trait TraceWriter {
    /// Write a batch of deliveries, in invocation order.
    fn write_deliveries(&mut self, rows: &[DeliveryRow]) -> TraceResult<()>;

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> TraceResult<()>;

    /// Flush and close all underlying handles.  Idempotent.
    fn finish(&mut self) -> TraceResult<()>;
}
