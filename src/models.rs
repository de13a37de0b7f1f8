//! Domain records produced by the scraping core.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error_handling::ExtractionStats;
use crate::identifier::Cuit;
use crate::probe::JurisdictionStatus;

/// Server-issued hidden form state, in document order.
///
/// Has no public mutators: a token set is captured once from a form page and
/// then only read or consumed into a submission payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenSet {
    fields: Vec<(String, String)>,
}

impl TokenSet {
    /// Adds a field unless one with the same name is already present.
    pub(crate) fn insert_first(&mut self, name: &str, value: &str) {
        if self.get(name).is_none() {
            self.fields.push((name.to_string(), value.to_string()));
        }
    }

    /// Value of a field, if the page emitted it.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }

    /// Number of captured fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True if the page emitted none of the known fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field names in document order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub(crate) fn into_fields(self) -> Vec<(String, String)> {
        self.fields
    }
}

/// One rejected cheque returned for insufficient funds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedInstrumentRecord {
    /// Rejection date as printed by the portal
    pub date: String,
    /// Cheque number
    pub instrument_number: String,
    /// Cheque amount
    pub amount: Decimal,
    /// Reason text, uppercased with whitespace collapsed
    pub reason_code: String,
}

/// Records extracted from one submission response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultSet {
    /// Included records in document order
    pub records: Vec<RejectedInstrumentRecord>,
    /// Sum of the included amounts
    pub total: Decimal,
    /// Rows that were skipped, by reason
    pub skipped: ExtractionStats,
}

impl ResultSet {
    /// Assembles a result set; the total is computed from the records.
    pub fn new(records: Vec<RejectedInstrumentRecord>, skipped: ExtractionStats) -> Self {
        let total = records.iter().map(|record| record.amount).sum();
        Self {
            records,
            total,
            skipped,
        }
    }

    /// True if no record matched.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Everything the report assembler needs for one identifier.
#[derive(Debug, Clone, Serialize)]
pub struct ReportBundle {
    /// Queried identifier
    pub identifier: Cuit,
    /// When the queries were issued
    pub consulted_at: DateTime<Utc>,
    /// BCRA rejected-cheques result; absent when the query was skipped
    pub bcra: Option<ResultSet>,
    /// One status per jurisdiction, in probe order
    pub jurisdictions: Vec<JurisdictionStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn record(amount: &str) -> RejectedInstrumentRecord {
        RejectedInstrumentRecord {
            date: "01/02/2024".to_string(),
            instrument_number: "12345".to_string(),
            amount: Decimal::from_str(amount).unwrap(),
            reason_code: "SIN FONDOS".to_string(),
        }
    }

    #[test]
    fn test_result_set_total_is_sum_of_records() {
        let results = ResultSet::new(
            vec![record("10000.00"), record("250.50")],
            ExtractionStats::new(),
        );
        assert_eq!(results.total, Decimal::from_str("10250.50").unwrap());
        assert!(!results.is_empty());
    }

    #[test]
    fn test_empty_result_set_totals_zero() {
        let results = ResultSet::new(Vec::new(), ExtractionStats::new());
        assert_eq!(results.total, Decimal::ZERO);
        assert!(results.is_empty());
    }

    #[test]
    fn test_token_set_keeps_first_occurrence() {
        let mut tokens = TokenSet::default();
        tokens.insert_first("__VIEWSTATE", "first");
        tokens.insert_first("__VIEWSTATE", "second");
        assert_eq!(tokens.get("__VIEWSTATE"), Some("first"));
        assert_eq!(tokens.len(), 1);
    }

    #[test]
    fn test_record_amount_serializes_as_string() {
        let json = serde_json::to_value(record("10000.00")).unwrap();
        assert_eq!(json["amount"], "10000.00");
        assert_eq!(json["reason_code"], "SIN FONDOS");
    }
}
