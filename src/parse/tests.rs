// Parse module tests.

use super::*;
use crate::error_handling::ExtractionMiss;
use rust_decimal::Decimal;
use std::str::FromStr;

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn cells(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

const FORM_PAGE: &str = r#"<html><body><form method="post" action="Cheques_rechazados.aspx">
    <input type="hidden" name="__VIEWSTATE" id="__VIEWSTATE" value="dDwtMTA4MTc2OTY5Nzs7Pg==" />
    <input type="hidden" name="__VIEWSTATEGENERATOR" id="__VIEWSTATEGENERATOR" value="CA0B0334" />
    <input type="hidden" name="__EVENTVALIDATION" id="__EVENTVALIDATION" value="/wEWAwKM54rGBgL+raDpAgKC3IeGDA==" />
    <input type="text" name="txtCuit" value="" />
    <img src="Captcha.aspx" />
</form></body></html>"#;

// ----- tokens -----

#[test]
fn test_extract_tokens_all_three_fields() {
    let tokens = extract_tokens(FORM_PAGE);
    assert_eq!(tokens.len(), 3);
    assert_eq!(tokens.get("__VIEWSTATE"), Some("dDwtMTA4MTc2OTY5Nzs7Pg=="));
    assert_eq!(tokens.get("__VIEWSTATEGENERATOR"), Some("CA0B0334"));
    assert_eq!(
        tokens.get("__EVENTVALIDATION"),
        Some("/wEWAwKM54rGBgL+raDpAgKC3IeGDA==")
    );
}

#[test]
fn test_extract_tokens_missing_field_is_omitted() {
    let html = r#"<form>
        <input type="hidden" name="__VIEWSTATE" value="vs" />
        <input type="hidden" name="__EVENTVALIDATION" value="ev" />
    </form>"#;
    let tokens = extract_tokens(html);
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens.get("__VIEWSTATE"), Some("vs"));
    assert_eq!(tokens.get("__EVENTVALIDATION"), Some("ev"));
    assert_eq!(tokens.get("__VIEWSTATEGENERATOR"), None);
}

#[test]
fn test_extract_tokens_ignores_visible_and_unknown_inputs() {
    let html = r#"<form>
        <input type="text" name="__VIEWSTATE" value="visible" />
        <input type="hidden" name="csrf_other" value="x" />
        <input type="HIDDEN" name="__VIEWSTATEGENERATOR" value="gen" />
    </form>"#;
    let tokens = extract_tokens(html);
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens.get("__VIEWSTATEGENERATOR"), Some("gen"));
}

#[test]
fn test_extract_tokens_falls_back_to_id() {
    let html = r#"<input type="hidden" id="__VIEWSTATE" value="by-id" />"#;
    assert_eq!(extract_tokens(html).get("__VIEWSTATE"), Some("by-id"));
}

#[test]
fn test_extract_tokens_empty_value_is_kept() {
    let html = r#"<input type="hidden" name="__EVENTVALIDATION" />"#;
    assert_eq!(extract_tokens(html).get("__EVENTVALIDATION"), Some(""));
}

#[test]
fn test_extract_tokens_malformed_html_degrades() {
    let html = r#"<html><form><input type="hidden" name="__VIEWSTATE" value="partial"
        <div><<<input type=hidden name=__EVENTVALIDATION value="#;
    let tokens = extract_tokens(html);
    assert!(tokens.len() <= 3);
    assert!(extract_tokens("").is_empty());
    assert!(extract_tokens("not html at all").is_empty());
}

// ----- amounts -----

#[test]
fn test_normalize_argentine_amount() {
    assert_eq!(normalize_amount("$ 10.000,00"), "10000.00");
    assert_eq!(normalize_amount("$1.234.567,89"), "1234567.89");
    assert_eq!(normalize_amount("  250,5 "), "250.5");
}

#[test]
fn test_normalize_other_layouts() {
    assert_eq!(normalize_amount("1,234,567.89"), "1234567.89");
    assert_eq!(normalize_amount("1.234.567"), "1234567");
    assert_eq!(normalize_amount("10000.00"), "10000.00");
    assert_eq!(normalize_amount("ARS 99"), "99");
}

#[test]
fn test_normalize_amount_without_cents() {
    assert_eq!(normalize_amount("$ 10.000"), "10000");
    assert_eq!(normalize_amount("1.500"), "1500");
    assert_eq!(normalize_amount("1,234.567"), "1234567");
    assert_eq!(normalize_amount("1.5"), "1.5");
    assert_eq!(normalize_amount("1.2345"), "1.2345");
}

#[test]
fn test_normalize_is_idempotent() {
    for raw in [
        "$ 10.000,00",
        "10000.00",
        "1,234,567.89",
        "1.234.567",
        "12,5",
        "$ -1.500,25",
        "",
        "n/a",
        "1.2.3,4,5",
        "$ 10.000",
        "1.500",
        "1,234.567",
        "0.5",
    ] {
        let once = normalize_amount(raw);
        assert_eq!(normalize_amount(&once), once, "not idempotent for {raw:?}");
    }
}

#[test]
fn test_parse_amount() {
    assert_eq!(parse_amount("$ 10.000,00"), Some(dec("10000.00")));
    assert_eq!(parse_amount("$ -1.500,25"), Some(dec("-1500.25")));
    assert_eq!(parse_amount("$ 10.000"), Some(dec("10000")));
    assert_eq!(parse_amount("$ 1.500"), Some(dec("1500")));
    assert_eq!(parse_amount("$ -"), None);
    assert_eq!(parse_amount(""), None);
    assert_eq!(parse_amount("sin importe"), None);
}

// ----- reasons -----

#[test]
fn test_insufficient_funds_spellings() {
    assert!(is_insufficient_funds(&normalize_reason("SIN FONDOS")));
    assert!(is_insufficient_funds(&normalize_reason("  sin   fondos ")));
    assert!(is_insufficient_funds(&normalize_reason("S/FONDOS")));
    assert!(is_insufficient_funds(&normalize_reason("s/ fondos.")));
    assert!(!is_insufficient_funds(&normalize_reason("CUENTA CERRADA")));
    assert!(!is_insufficient_funds(&normalize_reason("DEFECTOS FORMALES")));
}

#[test]
fn test_normalize_reason_collapses_whitespace() {
    assert_eq!(normalize_reason(" sin\n\t fondos "), "SIN FONDOS");
}

// ----- rows -----

#[test]
fn test_extract_record_positional_fields() {
    let record = extract_record(&cells(&[
        "15/03/2024",
        "Banco Nación",
        "00012345",
        "$ 10.000,00",
        "SIN FONDOS",
    ]))
    .unwrap();
    assert_eq!(record.date, "15/03/2024");
    assert_eq!(record.instrument_number, "00012345");
    assert_eq!(record.amount, dec("10000.00"));
    assert_eq!(record.reason_code, "SIN FONDOS");
}

#[test]
fn test_extract_record_too_few_cells() {
    assert_eq!(
        extract_record(&cells(&["15/03/2024", "SIN FONDOS", "$ 1,00"])),
        Err(ExtractionMiss::TooFewCells)
    );
}

#[test]
fn test_extract_record_no_reason() {
    assert_eq!(
        extract_record(&cells(&["Fecha", "Entidad", "Nro", "Monto", "Motivo"])),
        Err(ExtractionMiss::NoReasonCell)
    );
}

#[test]
fn test_extract_record_other_reason() {
    assert_eq!(
        extract_record(&cells(&["15/03/2024", "X", "1", "$ 5,00", "CUENTA CERRADA"])),
        Err(ExtractionMiss::ReasonNotInsufficientFunds)
    );
}

#[test]
fn test_extract_record_prefers_insufficient_funds_cell() {
    let record = extract_record(&cells(&[
        "15/03/2024",
        "BANCO FONDOS COMUNES",
        "00012345",
        "$ 750,00",
        "SIN FONDOS",
    ]))
    .unwrap();
    assert_eq!(record.reason_code, "SIN FONDOS");
    assert_eq!(record.amount, dec("750.00"));
}

#[test]
fn test_extract_record_bad_amount() {
    assert_eq!(
        extract_record(&cells(&["15/03/2024", "X", "1", "pendiente", "SIN FONDOS"])),
        Err(ExtractionMiss::UnparseableAmount)
    );
}

// ----- documents -----

#[test]
fn test_single_insufficient_funds_row() {
    let html = r#"<html><body>
        <table><tr><td>Cheques rechazados</td></tr></table>
        <table class="grid">
            <tr><th>Fecha</th><th>Entidad</th><th>Nro. Cheque</th><th>Monto</th><th>Motivo</th></tr>
            <tr><td>15/03/2024</td><td>BANCO X</td><td>00012345</td><td>$ 10.000,00</td><td>SIN FONDOS</td></tr>
        </table>
    </body></html>"#;
    let results = extract_rejected_instruments(html);
    assert_eq!(results.records.len(), 1);
    assert_eq!(results.records[0].amount, dec("10000.00"));
    assert_eq!(results.total, dec("10000.00"));
    assert_eq!(results.skipped.count(ExtractionMiss::NoReasonCell), 1);
}

#[test]
fn test_other_reasons_do_not_affect_total() {
    let html = r#"<table>
        <tr><th>Fecha</th><th>Entidad</th><th>Nro.</th><th>Monto</th><th>Motivo</th></tr>
        <tr><td>01/02/2024</td><td>B</td><td>1</td><td>$ 1.000,00</td><td>SIN FONDOS</td></tr>
        <tr><td>02/02/2024</td><td>B</td><td>2</td><td>$ 9.999,00</td><td>CUENTA CERRADA</td></tr>
        <tr><td>03/02/2024</td><td>B</td><td>3</td><td>$ 500,50</td><td>S/FONDOS</td></tr>
        <tr><td>short</td><td>row</td></tr>
    </table>"#;
    let results = extract_rejected_instruments(html);
    assert_eq!(results.records.len(), 2);
    assert_eq!(results.records[0].instrument_number, "1");
    assert_eq!(results.records[1].instrument_number, "3");
    assert_eq!(results.total, dec("1500.50"));
    assert_eq!(
        results.skipped.count(ExtractionMiss::ReasonNotInsufficientFunds),
        1
    );
    assert_eq!(results.skipped.count(ExtractionMiss::TooFewCells), 1);
}

#[test]
fn test_tables_without_markers_are_ignored() {
    let html = r#"<table>
        <tr><td>01/02/2024</td><td>B</td><td>1</td><td>$ 1.000,00</td><td>SIN FONDOS</td></tr>
    </table>"#;
    let results = extract_rejected_instruments(html);
    assert!(results.is_empty());
    assert_eq!(results.total, Decimal::ZERO);
    assert_eq!(results.skipped.total(), 0);
}

#[test]
fn test_nested_tables_are_read_once() {
    let html = r#"<table id="layout"><tr><td>
        <h2>Cheques Rechazados</h2>
        <table>
            <tr><th>Fecha</th><th>Entidad</th><th>Nro.</th><th>Monto</th><th>Motivo</th></tr>
            <tr><td>01/02/2024</td><td>B</td><td>7</td><td>$ 2.000,00</td><td>SIN FONDOS</td></tr>
        </table>
    </td></tr></table>"#;
    let results = extract_rejected_instruments(html);
    assert_eq!(results.records.len(), 1);
    assert_eq!(results.total, dec("2000.00"));
}

#[test]
fn test_unmarked_table_inside_marked_layout_is_read() {
    let html = r#"<table>
        <tr><td>Cheques rechazados</td></tr>
        <tr><td><table>
            <tr><td>01/02/2024</td><td>B</td><td>9</td><td>$ 2.000,00</td><td>SIN FONDOS</td></tr>
        </table></td></tr>
    </table>"#;
    let results = extract_rejected_instruments(html);
    assert_eq!(results.records.len(), 1);
    assert_eq!(results.records[0].instrument_number, "9");
    assert_eq!(results.total, dec("2000.00"));
}

#[test]
fn test_amount_without_cents_counts_in_full() {
    let html = r#"<table><caption>Cheques rechazados</caption>
        <tr><td>01/02/2024</td><td>B</td><td>1</td><td>$ 10.000</td><td>SIN FONDOS</td></tr>
        <tr><td>02/02/2024</td><td>B</td><td>2</td><td>$ 1.500,50</td><td>SIN FONDOS</td></tr>
    </table>"#;
    let results = extract_rejected_instruments(html);
    assert_eq!(results.records[0].amount, dec("10000"));
    assert_eq!(results.total, dec("11500.50"));
}

#[test]
fn test_unparseable_amount_skips_only_that_row() {
    let html = r#"<table><caption>Motivo del rechazo</caption>
        <tr><td>01/02/2024</td><td>B</td><td>1</td><td>---</td><td>SIN FONDOS</td></tr>
        <tr><td>02/02/2024</td><td>B</td><td>2</td><td>$ 300,00</td><td>SIN FONDOS</td></tr>
    </table>"#;
    let results = extract_rejected_instruments(html);
    assert_eq!(results.records.len(), 1);
    assert_eq!(results.total, dec("300.00"));
    assert_eq!(results.skipped.count(ExtractionMiss::UnparseableAmount), 1);
}

#[test]
fn test_garbage_response_yields_empty_result() {
    let results = extract_rejected_instruments("<table><tr><td>rechazados<td></table></tr>");
    assert!(results.is_empty());
}
