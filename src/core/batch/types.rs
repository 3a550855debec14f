//! Batch processing types and data structures

use crate::core::types::TraceResult;
use crate::core::validator::TrackingIdentifier;
use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;

/// Errors that reject a whole run before any lookup is issued
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BatchError {
    #[error("too many lines: {count} (maximum {max})")]
    TooManyLines { count: usize, max: usize },

    #[error("input contains no data lines")]
    Empty,
}

/// Lifecycle of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "next_index", rename_all = "snake_case")]
pub enum RunState {
    /// Created, nothing issued yet
    Idle,
    /// Identifiers before this index are finished
    Processing(usize),
    /// Every identifier has a result
    Done,
    /// Cancelled or superseded; no further lookups are issued
    Aborted,
}

impl RunState {
    pub fn is_finished(&self) -> bool {
        matches!(self, RunState::Done | RunState::Aborted)
    }
}

/// Cumulative progress published after each finished identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
    pub current: TrackingIdentifier,
}

impl Progress {
    /// Rounded completion percentage
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 100;
        }
        ((self.completed * 100 + self.total / 2) / self.total).min(100) as u8
    }
}

/// Cancellation flag shared between a run and whoever supersedes it
#[derive(Debug, Clone, Default)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Final state of a run
#[derive(Debug, Clone, Serialize)]
pub struct BatchOutcome {
    pub state: RunState,
    pub total: usize,
    pub results: Vec<TraceResult>,
}

impl BatchOutcome {
    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|r| r.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.results.len() - self.succeeded()
    }
}
