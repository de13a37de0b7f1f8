//! Error handling and extraction statistics.
//!
//! This module provides:
//! - Error type definitions (`ScrapeError`, `InitializationError`)
//! - Transport error categorization
//! - Counters for extraction misses
//!
//! Outcomes are split into:
//! - **Errors**: surfaced to the caller, who restarts the workflow
//! - **Misses**: rows excluded from the result set, counted and never surfaced

mod categorization;
mod stats;
mod types;

// Re-export public API
pub use categorization::categorize_reqwest_error;
pub use stats::ExtractionStats;
pub use types::{ErrorType, ExtractionMiss, InitializationError, ScrapeError};
