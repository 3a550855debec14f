//! CSV input parsing
//!
//! One identifier per line, taken from the first comma-separated field. An
//! optional header line is dropped and invalid identifiers are skipped.

use super::types::BatchError;
use crate::core::validator::{InvalidIdentifier, TrackingIdentifier, validate};
use tracing::warn;

/// Substrings marking the first line as a header (matched lowercase)
const HEADER_MARKERS: [&str; 2] = ["btt", "no"];

/// A data line whose identifier failed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based position among the data lines
    pub line: usize,
    pub token: String,
    pub reason: InvalidIdentifier,
}

/// Identifiers accepted from one input, in input order
#[derive(Debug, Clone, Default)]
pub struct ParsedInput {
    pub identifiers: Vec<TrackingIdentifier>,
    pub skipped: Vec<SkippedLine>,
    pub header_skipped: bool,
}

/// Whether a line looks like the CSV header
pub fn is_header_line(line: &str) -> bool {
    let lower = line.to_lowercase();
    HEADER_MARKERS.iter().any(|marker| lower.contains(marker))
}

/// First comma-separated field with surrounding whitespace and quotes removed
pub fn extract_candidate(line: &str) -> &str {
    line.split(',')
        .next()
        .unwrap_or_default()
        .trim()
        .trim_matches(|c: char| c == '"' || c == '\'')
}

/// Parse raw text into identifiers.
///
/// The line limit applies to data lines (after blank lines and the header
/// are dropped) before any validation happens.
pub fn parse_input(raw: &str, max_lines: usize) -> Result<ParsedInput, BatchError> {
    let mut lines = raw.lines().map(str::trim).filter(|line| !line.is_empty()).peekable();

    let header_skipped = lines.next_if(|first| is_header_line(first)).is_some();
    let data_lines: Vec<&str> = lines.collect();

    if data_lines.is_empty() {
        return Err(BatchError::Empty);
    }

    if data_lines.len() > max_lines {
        return Err(BatchError::TooManyLines {
            count: data_lines.len(),
            max: max_lines,
        });
    }

    let mut parsed = ParsedInput {
        header_skipped,
        ..Default::default()
    };

    for (index, line) in data_lines.into_iter().enumerate() {
        let candidate = extract_candidate(line);
        match validate(candidate) {
            Ok(identifier) => parsed.identifiers.push(identifier),
            Err(reason) => {
                warn!("Skipping line {}: {:?} ({})", index + 1, candidate, reason);
                parsed.skipped.push(SkippedLine {
                    line: index + 1,
                    token: candidate.to_string(),
                    reason,
                });
            }
        }
    }

    Ok(parsed)
}
