// src/progress.rs
use crate::types::SpotId;

/// Lightweight progress reporting used by the long-running collection run.
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the number of spots to process.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One spot finished; `images` were written for it.
    fn item_done(&mut self, _id: &SpotId, _images: usize) {}

    /// One spot was skipped after an error.
    fn item_failed(&mut self, _id: &SpotId, _reason: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
