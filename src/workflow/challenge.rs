//! Challenge fetching: form page, then captcha image, on one session.

use log::debug;

use crate::error_handling::ScrapeError;
use crate::models::TokenSet;
use crate::parse::extract_tokens;
use crate::session::{SessionId, SessionTransport};

use super::{BcraTarget, WorkflowStage};

/// A captcha image paired with the form tokens captured alongside it.
///
/// Only [`start_challenge`] constructs challenges, so the image and tokens
/// always come from the same session round-trip. The challenge remembers
/// which session that was; [`submit`](super::submit) refuses to use it on any
/// other. It is consumed by submission and cannot be refreshed in parts.
#[derive(Debug)]
pub struct Challenge {
    session: SessionId,
    image: Vec<u8>,
    tokens: TokenSet,
}

impl Challenge {
    /// Raw captcha image bytes, as served.
    pub fn image(&self) -> &[u8] {
        &self.image
    }

    /// Form tokens captured with the image.
    pub fn tokens(&self) -> &TokenSet {
        &self.tokens
    }

    /// Session that produced this challenge.
    pub fn session_id(&self) -> SessionId {
        self.session
    }

    pub(crate) fn into_tokens(self) -> TokenSet {
        self.tokens
    }
}

/// Loads the form and the captcha image through `session`.
///
/// # Errors
///
/// - `ScrapeError::Connection` if either request fails or times out
/// - `ScrapeError::UpstreamUnavailable` if either request returns a
///   non-success status
pub async fn start_challenge<T: SessionTransport>(
    session: &mut T,
    target: &BcraTarget,
) -> Result<Challenge, ScrapeError> {
    let session_id = session.id();

    let form = session.get(&target.form_url, target.form_timeout).await?;
    if !form.is_success() {
        return Err(ScrapeError::UpstreamUnavailable {
            url: target.form_url.clone(),
            status: form.status,
        });
    }

    if form.url != target.form_url {
        debug!("Form page {} redirected to {}", target.form_url, form.url);
    }

    let tokens = extract_tokens(&form.text());
    if tokens.is_empty() {
        log::warn!(
            "Form page {} carried no known hidden fields; submitting without tokens",
            target.form_url
        );
    }
    debug!(
        "Session {}: {} -> {}",
        session_id,
        WorkflowStage::Idle,
        WorkflowStage::TokensObtained
    );

    let image = session
        .get(&target.captcha_url, target.captcha_timeout)
        .await?;
    if !image.is_success() {
        return Err(ScrapeError::UpstreamUnavailable {
            url: target.captcha_url.clone(),
            status: image.status,
        });
    }
    debug!(
        "Session {}: {} -> {} ({} byte image)",
        session_id,
        WorkflowStage::TokensObtained,
        WorkflowStage::ChallengePending,
        image.body.len()
    );

    Ok(Challenge {
        session: session_id,
        image: image.body,
        tokens,
    })
}
