//! CSV export of batch results

use crate::core::types::{Outcome, TraceResult};
use crate::utils::current_timestamp_millis;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use std::io::Write;
use tracing::warn;

/// Header row of every export
pub const CSV_HEADER: &str = "NO,BTT,TANGGAL HISTORY,KETERANGAN,POSISI,STATUS";

/// Status column value for failed lookups
pub const ERROR_STATUS: &str = "ERROR";

fn record(result: &TraceResult) -> [String; 6] {
    let (description, status) = match &result.outcome {
        Outcome::Ok => (result.description.clone(), result.status.clone()),
        Outcome::Error(message) => (format!("Error: {}", message), ERROR_STATUS.to_string()),
    };

    [
        result.sequence_number.to_string(),
        result.identifier.to_string(),
        result.date.clone(),
        description,
        result.position.clone(),
        status,
    ]
}

/// Write the header and one fully quoted row per result, in order.
pub fn write_csv<W: Write>(results: &[TraceResult], mut out: W) -> csv::Result<()> {
    out.write_all(CSV_HEADER.as_bytes())?;
    out.write_all(b"\n")?;

    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(out);

    for result in results {
        writer.write_record(record(result))?;
    }

    writer.flush()?;
    Ok(())
}

/// Serialize results to CSV text.
pub fn to_csv(results: &[TraceResult]) -> String {
    let mut buf = Vec::with_capacity(CSV_HEADER.len() + 1 + results.len() * 64);

    if let Err(e) = write_csv(results, &mut buf) {
        warn!("CSV export truncated: {}", e);
    }

    String::from_utf8_lossy(&buf).into_owned()
}

/// `tracking_results_<unix millis>.csv`
pub fn default_export_filename() -> String {
    format!("tracking_results_{}.csv", current_timestamp_millis())
}
