//! Report summary logging.

use log::info;
use strum::IntoEnumIterator;

use crate::error_handling::{ExtractionMiss, ExtractionStats};
use crate::models::ReportBundle;

/// Logs a short summary of a finished report.
pub fn print_report_summary(report: &ReportBundle) {
    match &report.bcra {
        Some(results) => {
            info!(
                "✅ BCRA: {} rejected cheque{} for insufficient funds, total {}",
                results.records.len(),
                if results.records.len() == 1 { "" } else { "s" },
                results.total
            );
            print_extraction_statistics(&results.skipped);
        }
        None => info!("BCRA query skipped"),
    }

    for status in &report.jurisdictions {
        info!(
            "{:?}: {:?} - {}",
            status.jurisdiction_id, status.classification, status.raw_note
        );
    }
}

/// Logs the per-reason counts of skipped rows.
pub fn print_extraction_statistics(stats: &ExtractionStats) {
    for line in extraction_statistics_lines(stats) {
        info!("{}", line);
    }
}

/// Lines logged by [`print_extraction_statistics`]; empty when nothing was
/// skipped.
fn extraction_statistics_lines(stats: &ExtractionStats) -> Vec<String> {
    let total = stats.total();
    if total == 0 {
        return Vec::new();
    }

    let mut lines = vec![format!("Skipped rows ({} total):", total)];
    lines.extend(
        ExtractionMiss::iter()
            .map(|miss| (miss, stats.count(miss)))
            .filter(|(_, count)| *count > 0)
            .map(|(miss, count)| format!("   {}: {}", miss, count)),
    );
    lines
}
