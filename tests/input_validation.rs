//! Tests for input rejection before any network call.

use fiscal_status::{query_bcra, Config, Cuit, FixedSolver, LogLevel, ScrapeError};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[test]
fn test_malformed_identifiers_are_rejected() {
    for input in [
        "",
        "2012345678",
        "201234567890",
        "20-1234567-89",
        "20.12345678.9",
        "2012345678a",
        "２０１２３４５６７８９",
    ] {
        match Cuit::parse(input) {
            Err(ScrapeError::InvalidInput(_)) => {}
            other => panic!("{input:?} should be rejected, got {other:?}"),
        }
    }
}

#[test]
fn test_identifier_forms_normalize() {
    let bare = Cuit::parse("20123456789").unwrap();
    let dashed = Cuit::parse(" 20-12345678-9 ").unwrap();
    assert_eq!(bare, dashed);
    assert_eq!(dashed.to_string(), "20123456789");
}

#[tokio::test]
async fn test_empty_captcha_answer_sends_no_submission() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/form"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<input type="hidden" name="__VIEWSTATE" value="vs" />"#,
        ))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/captcha"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"img".to_vec()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let config = Config {
        log_level: LogLevel::Error,
        bcra_form_url: format!("{}/form", server.uri()),
        bcra_captcha_url: format!("{}/captcha", server.uri()),
        ..Default::default()
    };
    let cuit = Cuit::parse("20123456789").unwrap();
    let mut solver = FixedSolver("   ".to_string());

    let err = query_bcra(&config, &cuit, &mut solver)
        .await
        .expect_err("Blank answer must be rejected");
    assert!(
        format!("{err:#}").contains("captcha answer is empty"),
        "unexpected error: {err:#}"
    );
}
