//! Progress reporting

use super::types::Progress;
use crate::core::types::TraceResult;

/// Receives progress from a running batch. Implementations must not block.
pub trait ProgressSink: Send + Sync {
    /// Called after each identifier finishes
    fn on_progress(&self, progress: &Progress);

    /// Called with each result right after it is recorded
    fn on_result(&self, _result: &TraceResult) {}
}

impl<F> ProgressSink for F
where
    F: Fn(&Progress) + Send + Sync,
{
    fn on_progress(&self, progress: &Progress) {
        self(progress)
    }
}

/// Sink that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopProgress;

impl ProgressSink for NoopProgress {
    fn on_progress(&self, _progress: &Progress) {}
}
