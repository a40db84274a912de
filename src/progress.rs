// src/progress.rs
use crate::harvest::HarvestReport;

/// Lightweight progress reporting for a harvest run.
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called once the source has been read, with the number of items found.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One record reached the store.
    fn item_done(&mut self, _name: &str) {}

    /// One item was dropped (unlocatable or rejected by the store).
    fn item_skipped(&mut self, _name: &str, _reason: &str) {}

    /// Called at the end of a run that got as far as processing items.
    fn finish(&mut self, _report: &HarvestReport) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
