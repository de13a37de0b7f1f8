//! HTML parsing and data extraction.
//!
//! This module turns portal pages into typed values:
//! - Hidden anti-forgery fields of the form page ([`extract_tokens`])
//! - Rejected-instrument rows of the submission response
//!   ([`extract_rejected_instruments`])
//! - Amount normalization shared by both
//!
//! All parsing is done with the `scraper` crate and is tolerant: malformed
//! markup produces partial results, never errors.

mod amount;
mod records;
mod tokens;

// Re-export public API
pub use amount::{normalize_amount, parse_amount};
pub use records::{
    extract_record, extract_rejected_instruments, is_insufficient_funds, normalize_reason,
};
pub use tokens::extract_tokens;
