//! Hidden form token extraction.

use std::sync::LazyLock;

use scraper::{Html, Selector};

use crate::config::WELL_KNOWN_TOKEN_FIELDS;
use crate::models::TokenSet;
use crate::utils::parse_selector_with_fallback;

static INPUT_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_with_fallback("input", "hidden token inputs"));

/// Extracts the well-known hidden form fields from a page.
///
/// Looks at every `<input type="hidden">` (type compared case-insensitively)
/// and keys it by `name`, or by `id` when the page omits the name. Only the
/// fields in [`WELL_KNOWN_TOKEN_FIELDS`] are kept; the first occurrence of a
/// field wins. Fields the page does not emit are simply absent, and broken
/// markup yields whatever html5ever could recover.
pub fn extract_tokens(html: &str) -> TokenSet {
    let document = Html::parse_document(html);
    let mut tokens = TokenSet::default();

    for input in document.select(&INPUT_SELECTOR) {
        let element = input.value();
        let is_hidden = element
            .attr("type")
            .is_some_and(|t| t.trim().eq_ignore_ascii_case("hidden"));
        if !is_hidden {
            continue;
        }

        let Some(name) = element.attr("name").or_else(|| element.attr("id")) else {
            continue;
        };
        if !WELL_KNOWN_TOKEN_FIELDS.contains(&name) {
            continue;
        }

        tokens.insert_first(name, element.attr("value").unwrap_or_default());
    }

    log::debug!(
        "Extracted {} of {} form tokens",
        tokens.len(),
        WELL_KNOWN_TOKEN_FIELDS.len()
    );
    tokens
}
