// batch.rs
//
// Best-effort batch policy: records are processed one at a time, a failure is
// written onto the record itself and the batch carries on.

use crate::enrich::models::PlaceRecord;
use std::time::Duration;
use tracing::{info, warn};

/// Result of processing one record.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Done(T),
    Failed { record: T, reason: String },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub ok: usize,
    pub failed: usize,
}

/// Records that can carry a failure reason in the output file.
pub trait Annotate {
    fn annotate_error(&mut self, reason: String);
    fn label(&self) -> String;
}

impl Annotate for PlaceRecord {
    fn annotate_error(&mut self, reason: String) {
        self.error = Some(reason);
    }

    fn label(&self) -> String {
        if self.id.is_empty() {
            self.name.clone()
        } else {
            format!("{} ({})", self.name, self.id)
        }
    }
}

/// Run `step` over every record in order, sleeping `delay` between records.
///
/// Failed records are annotated and kept, so the output always has one record
/// per input record.
pub fn run_batch<T, F>(stage: &str, records: Vec<T>, delay: Duration, mut step: F) -> (Vec<T>, BatchSummary)
where
    T: Annotate,
    F: FnMut(T) -> Outcome<T>,
{
    let total = records.len();
    let mut summary = BatchSummary {
        total,
        ..BatchSummary::default()
    };
    let mut out = Vec::with_capacity(total);

    for (i, record) in records.into_iter().enumerate() {
        if i > 0 && !delay.is_zero() {
            std::thread::sleep(delay);
        }

        match step(record) {
            Outcome::Done(record) => {
                summary.ok += 1;
                info!("✅ [{stage} {}/{total}] {}", i + 1, record.label());
                out.push(record);
            }
            Outcome::Failed { mut record, reason } => {
                summary.failed += 1;
                warn!("⚠️ [{stage} {}/{total}] {}: {reason}", i + 1, record.label());
                record.annotate_error(reason);
                out.push(record);
            }
        }
    }

    info!(
        "🏁 {stage} finished: total={}, ok={}, failed={}",
        summary.total, summary.ok, summary.failed
    );

    (out, summary)
}
