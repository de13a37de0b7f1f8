//! Shared helpers.

mod selector;

pub use selector::parse_selector_with_fallback;
