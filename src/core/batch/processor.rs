//! Batch execution
//!
//! A [`BatchRun`] is a small state machine (`Idle -> Processing(i) -> Done |
//! Aborted`) advanced one identifier per [`BatchRun::step`]. Lookups are
//! strictly sequential with a fixed pause between them. Cancellation is a
//! flag checked around every suspension point; a lookup already in flight
//! is allowed to finish and its result is dropped.

use super::parser::parse_input;
use super::progress::ProgressSink;
use super::source::TraceSource;
use super::types::{BatchError, BatchOutcome, CancelHandle, Progress, RunState};
use crate::config::BatchConfig;
use crate::core::types::TraceResult;
use crate::core::validator::TrackingIdentifier;
use futures::Stream;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Client-side session owning at most one active run
pub struct BatchProcessor<S: TraceSource + ?Sized> {
    source: Arc<S>,
    config: BatchConfig,
    active: Option<CancelHandle>,
}

impl<S: TraceSource + ?Sized> BatchProcessor<S> {
    /// Create a new batch processor
    pub fn new(source: Arc<S>, config: BatchConfig) -> Self {
        Self {
            source,
            config,
            active: None,
        }
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Accept `raw` and create a run for it, superseding any previous run.
    ///
    /// Rejected input leaves the previous run untouched and issues no
    /// lookups.
    pub fn start(&mut self, raw: &str) -> Result<BatchRun<S>, BatchError> {
        let parsed = parse_input(raw, self.config.max_lines)?;

        if let Some(previous) = self.active.take() {
            if !previous.is_cancelled() {
                info!("Superseding previous batch run");
            }
            previous.cancel();
        }

        let cancel = CancelHandle::new();
        self.active = Some(cancel.clone());

        info!(
            total = parsed.identifiers.len(),
            skipped = parsed.skipped.len(),
            header = parsed.header_skipped,
            "Starting batch run"
        );

        Ok(BatchRun::new(
            self.source.clone(),
            parsed.identifiers,
            self.config.pacing(),
            cancel,
        ))
    }

    /// Abandon the active run, if any
    pub fn cancel(&mut self) {
        if let Some(active) = self.active.take() {
            active.cancel();
        }
    }

    /// Start a run for `raw` and drive it to completion
    pub async fn run(
        &mut self,
        raw: &str,
        sink: &dyn ProgressSink,
    ) -> Result<BatchOutcome, BatchError> {
        let run = self.start(raw)?;
        Ok(run.run_to_end(sink).await)
    }
}

/// One pass over a list of identifiers
pub struct BatchRun<S: TraceSource + ?Sized> {
    source: Arc<S>,
    identifiers: Vec<TrackingIdentifier>,
    results: Vec<TraceResult>,
    state: RunState,
    pacing: Duration,
    cancel: CancelHandle,
}

impl<S: TraceSource + ?Sized> BatchRun<S> {
    /// Create a run directly; most callers go through [`BatchProcessor::start`]
    pub fn new(
        source: Arc<S>,
        identifiers: Vec<TrackingIdentifier>,
        pacing: Duration,
        cancel: CancelHandle,
    ) -> Self {
        let state = if identifiers.is_empty() {
            RunState::Done
        } else {
            RunState::Idle
        };

        Self {
            source,
            results: Vec::with_capacity(identifiers.len()),
            identifiers,
            state,
            pacing,
            cancel,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn total(&self) -> usize {
        self.identifiers.len()
    }

    pub fn identifiers(&self) -> &[TrackingIdentifier] {
        &self.identifiers
    }

    /// Results recorded so far, in input order
    pub fn results(&self) -> &[TraceResult] {
        &self.results
    }

    /// Handle that aborts this run from elsewhere
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    fn abort(&mut self) -> Option<TraceResult> {
        if self.state != RunState::Aborted {
            info!(
                completed = self.results.len(),
                total = self.total(),
                "Batch run aborted"
            );
        }
        self.state = RunState::Aborted;
        None
    }

    /// Resolve the next identifier. Returns `None` once the run is finished.
    pub async fn step(&mut self) -> Option<TraceResult> {
        let index = match self.state {
            RunState::Idle => 0,
            RunState::Processing(index) => index,
            RunState::Done | RunState::Aborted => return None,
        };

        if self.cancel.is_cancelled() {
            return self.abort();
        }

        if index > 0 && !self.pacing.is_zero() {
            tokio::time::sleep(self.pacing).await;
            if self.cancel.is_cancelled() {
                return self.abort();
            }
        }

        self.state = RunState::Processing(index);
        let identifier = self.identifiers[index].clone();
        let sequence_number = index + 1;

        let outcome = self.source.fetch(&identifier).await;

        if self.cancel.is_cancelled() {
            debug!(identifier = %identifier, "Discarding result of superseded run");
            return self.abort();
        }

        let result = match outcome {
            Ok(response) => TraceResult::success(sequence_number, identifier, response.detail),
            Err(e) => {
                warn!(identifier = %identifier, "Lookup failed: {}", e);
                TraceResult::failure(sequence_number, identifier, e.to_string())
            }
        };

        self.results.push(result.clone());
        self.state = if sequence_number == self.total() {
            RunState::Done
        } else {
            RunState::Processing(sequence_number)
        };

        Some(result)
    }

    /// Drive the run to the end, publishing progress after every identifier
    pub async fn run_to_end(mut self, sink: &dyn ProgressSink) -> BatchOutcome {
        let started = Instant::now();
        let total = self.total();

        while let Some(result) = self.step().await {
            sink.on_result(&result);
            sink.on_progress(&Progress {
                completed: self.results.len(),
                total,
                current: result.identifier.clone(),
            });
        }

        let outcome = BatchOutcome {
            state: self.state,
            total,
            results: self.results,
        };

        info!(
            state = ?outcome.state,
            succeeded = outcome.succeeded(),
            failed = outcome.failed(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Batch run finished"
        );

        outcome
    }

    /// Lazy view of the run: each poll resolves the next identifier
    pub fn into_stream(mut self) -> impl Stream<Item = TraceResult> {
        async_stream::stream! {
            while let Some(result) = self.step().await {
                yield result;
            }
        }
    }
}
