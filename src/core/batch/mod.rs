//! Batch processing of tracking identifiers
//!
//! Parses CSV-like text into identifiers and drives them one at a time
//! through a [`TraceSource`], pacing between calls and publishing progress to
//! a [`ProgressSink`].

mod parser;
mod processor;
mod progress;
mod source;
mod types;


pub use parser::{ParsedInput, SkippedLine, extract_candidate, is_header_line, parse_input};
pub use processor::{BatchProcessor, BatchRun};
pub use progress::{NoopProgress, ProgressSink};
pub use source::{LOCAL_CLIENT_KEY, ProxyClient, TraceSource};
pub use types::{BatchError, BatchOutcome, CancelHandle, Progress, RunState};
