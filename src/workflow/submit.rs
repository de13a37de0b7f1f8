//! Submission of a solved challenge.

use log::debug;

use crate::config::{CAPTCHA_FIELD, IDENTIFIER_FIELD, MAX_CAPTCHA_TEXT_LEN, SUBMIT_ACTION_FIELDS};
use crate::error_handling::ScrapeError;
use crate::identifier::Cuit;
use crate::models::{ResultSet, TokenSet};
use crate::parse::extract_rejected_instruments;
use crate::session::SessionTransport;

use super::{BcraTarget, Challenge, WorkflowStage};

/// Posts the solved challenge and extracts the rejected instruments.
///
/// The challenge is consumed: whatever the outcome, a retry needs a fresh one.
///
/// # Errors
///
/// - `ScrapeError::InvalidInput` if `solved_text` is empty or too long
/// - `ScrapeError::StaleChallenge` if `challenge` came from another session
/// - `ScrapeError::Connection` if the POST fails or times out
/// - `ScrapeError::UpstreamUnavailable` if the POST returns a non-success status
///
/// Validation errors are returned before anything is sent.
pub async fn submit<T: SessionTransport>(
    session: &mut T,
    target: &BcraTarget,
    challenge: Challenge,
    cuit: &Cuit,
    solved_text: &str,
) -> Result<ResultSet, ScrapeError> {
    let solved = validate_solved_text(solved_text)?;

    if challenge.session_id() != session.id() {
        return Err(ScrapeError::StaleChallenge {
            challenge_session: challenge.session_id(),
            session: session.id(),
        });
    }

    let payload = build_payload(challenge.into_tokens(), cuit, solved);
    debug!(
        "Session {}: posting {} fields to {}",
        session.id(),
        payload.len(),
        target.form_url
    );

    let response = session
        .post_form(&target.form_url, &payload, target.submit_timeout)
        .await?;
    if !response.is_success() {
        return Err(ScrapeError::UpstreamUnavailable {
            url: target.form_url.clone(),
            status: response.status,
        });
    }
    debug!(
        "Session {}: {} -> {}",
        session.id(),
        WorkflowStage::ChallengePending,
        WorkflowStage::Submitted
    );

    Ok(extract_rejected_instruments(&response.text()))
}

fn validate_solved_text(solved_text: &str) -> Result<&str, ScrapeError> {
    let solved = solved_text.trim();
    if solved.is_empty() {
        return Err(ScrapeError::InvalidInput(
            "captcha answer is empty".to_string(),
        ));
    }
    if solved.chars().count() > MAX_CAPTCHA_TEXT_LEN {
        return Err(ScrapeError::InvalidInput(format!(
            "captcha answer is longer than {} characters",
            MAX_CAPTCHA_TEXT_LEN
        )));
    }
    Ok(solved)
}

/// Captured tokens first, then the identifier, the answer and the postback
/// markers.
pub(crate) fn build_payload(tokens: TokenSet, cuit: &Cuit, solved: &str) -> Vec<(String, String)> {
    let mut payload = tokens.into_fields();
    payload.push((IDENTIFIER_FIELD.to_string(), cuit.as_str().to_string()));
    payload.push((CAPTCHA_FIELD.to_string(), solved.to_string()));
    payload.extend(
        SUBMIT_ACTION_FIELDS
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string())),
    );
    payload
}
