//! Rejected-instrument extraction from the submission response.
//!
//! The response has no stable structure, so extraction is heuristic:
//! candidate tables are found by marker text, the reason cell by vocabulary,
//! and the remaining fields by position. Every row that does not fit is an
//! [`ExtractionMiss`], counted and skipped.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use crate::error_handling::{ExtractionMiss, ExtractionStats};
use crate::models::{RejectedInstrumentRecord, ResultSet};
use crate::utils::parse_selector_with_fallback;

use super::amount::parse_amount;

/// Lowercase substrings that mark a table as holding rejected cheques.
const TABLE_MARKERS: [&str; 2] = ["rechazad", "motivo"];

/// Uppercase substrings that identify a cell as a rejection reason.
const REASON_VOCABULARY: [&str; 8] = [
    "FONDOS",
    "CUENTA CERRADA",
    "CTA CERRADA",
    "DEFECTOS FORMALES",
    "FIRMA",
    "EMBARGO",
    "ORDEN DE NO PAGAR",
    "ADULTERA",
];

/// Accepted spellings of "insufficient funds", compared with spaces and
/// periods removed.
const INSUFFICIENT_FUNDS_SPELLINGS: [&str; 2] = ["SINFONDOS", "S/FONDOS"];

const MIN_CELLS: usize = 4;
const DATE_CELL: usize = 0;
const INSTRUMENT_CELL: usize = 2;
const AMOUNT_CELL: usize = 3;

static TABLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_with_fallback("table", "result tables"));
static ROW_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_with_fallback("tr", "result rows"));

/// Extracts insufficient-funds records from a submission response.
///
/// Never fails: a page without candidate tables yields an empty result set,
/// and rows that do not fit are counted in `ResultSet::skipped`.
pub fn extract_rejected_instruments(html: &str) -> ResultSet {
    let document = Html::parse_document(html);
    let mut records = Vec::new();
    let mut skipped = ExtractionStats::new();

    let tables: Vec<ElementRef> = document
        .select(&TABLE_SELECTOR)
        .filter(|table| is_candidate_table(*table))
        .collect();
    log::debug!("Found {} candidate result tables", tables.len());

    for row in document
        .select(&ROW_SELECTOR)
        .filter(|row| inside_candidate(*row, &tables))
    {
        let cells = row_cells(row);
        match extract_record(&cells) {
            Ok(record) => records.push(record),
            Err(miss) => {
                log::debug!("Skipping row {:?}: {}", cells, miss);
                skipped.record(miss);
            }
        }
    }

    let results = ResultSet::new(records, skipped);
    log::info!(
        "Extracted {} rejected instruments (total {}), skipped {} rows",
        results.records.len(),
        results.total,
        results.skipped.total()
    );
    results
}

/// Builds a record from the text of one row's cells.
///
/// Field positions are fixed: date in cell 0, instrument number in cell 2,
/// amount in cell 3. The reason may sit in any cell; a cell naming
/// insufficient funds wins over earlier cells that merely share vocabulary,
/// such as a bank called "Fondos Comunes".
pub fn extract_record(cells: &[String]) -> Result<RejectedInstrumentRecord, ExtractionMiss> {
    if cells.len() < MIN_CELLS {
        return Err(ExtractionMiss::TooFewCells);
    }

    let reasons: Vec<String> = cells
        .iter()
        .map(|cell| normalize_reason(cell))
        .filter(|cell| REASON_VOCABULARY.iter().any(|term| cell.contains(term)))
        .collect();
    if reasons.is_empty() {
        return Err(ExtractionMiss::NoReasonCell);
    }
    let reason = reasons
        .into_iter()
        .find(|reason| is_insufficient_funds(reason))
        .ok_or(ExtractionMiss::ReasonNotInsufficientFunds)?;

    let amount = parse_amount(&cells[AMOUNT_CELL]).ok_or(ExtractionMiss::UnparseableAmount)?;

    Ok(RejectedInstrumentRecord {
        date: cells[DATE_CELL].clone(),
        instrument_number: cells[INSTRUMENT_CELL].clone(),
        amount,
        reason_code: reason,
    })
}

/// Uppercases reason text and collapses runs of whitespace.
pub fn normalize_reason(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}

/// True if a normalized reason is one of the insufficient-funds spellings.
pub fn is_insufficient_funds(normalized_reason: &str) -> bool {
    let compact: String = normalized_reason
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '.')
        .collect();
    INSUFFICIENT_FUNDS_SPELLINGS
        .iter()
        .any(|spelling| compact.contains(spelling))
}

fn is_candidate_table(table: ElementRef) -> bool {
    let text = table.text().collect::<String>().to_lowercase();
    TABLE_MARKERS.iter().any(|marker| text.contains(marker))
}

/// True if any table enclosing `row` is a candidate.
///
/// Rows of a nested table without markers of its own are read through the
/// candidate around it. Rows are visited in document order, so a row inside
/// nested candidates is still read once.
fn inside_candidate(row: ElementRef, candidates: &[ElementRef]) -> bool {
    row.ancestors()
        .filter_map(ElementRef::wrap)
        .filter(|ancestor| ancestor.value().name() == "table")
        .any(|table| candidates.iter().any(|candidate| candidate.id() == table.id()))
}

fn row_cells(row: ElementRef) -> Vec<String> {
    row.children()
        .filter_map(ElementRef::wrap)
        .filter(|cell| matches!(cell.value().name(), "td" | "th"))
        .map(|cell| {
            cell.text()
                .flat_map(str::split_whitespace)
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}
