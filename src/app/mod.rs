//! Application-level helpers used by the report runner and the binary.
//!
//! This module provides captcha solvers and report summary logging.

pub mod captcha;
pub mod statistics;

// Re-export public API
pub use captcha::{CaptchaSolver, FixedSolver, StdinSolver};
pub use statistics::{print_extraction_statistics, print_report_summary};
