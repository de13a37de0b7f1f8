//! BCRA rejected-cheques workflow.
//!
//! The workflow runs on a single session:
//! 1. Load the form page and capture its hidden tokens
//! 2. Download the captcha image served for that session
//! 3. Post the tokens, the identifier and the solved captcha
//! 4. Extract the insufficient-funds records from the response
//!
//! [`Workflow`] encodes the order in its type parameter, so submitting before
//! a challenge exists does not compile. Any failure consumes the workflow
//! together with its session; a retry starts from [`Workflow::new`] with a
//! fresh session and never reuses old tokens.
//!
//! The free functions [`start_challenge`] and [`submit`] are the same steps
//! without the typestate wrapper.

mod challenge;
mod submit;

use std::fmt;
use std::time::Duration;

use log::warn;
use serde::Serialize;

use crate::config::Config;
use crate::error_handling::ScrapeError;
use crate::identifier::Cuit;
use crate::models::ResultSet;
use crate::session::SessionTransport;

pub use challenge::{start_challenge, Challenge};
pub use submit::submit;

/// Endpoints and step timeouts of the BCRA form.
#[derive(Debug, Clone)]
pub struct BcraTarget {
    /// Form page, also the POST target
    pub form_url: String,
    /// Captcha image resource
    pub captcha_url: String,
    /// Form page timeout
    pub form_timeout: Duration,
    /// Captcha image timeout
    pub captcha_timeout: Duration,
    /// Submission timeout
    pub submit_timeout: Duration,
}

impl From<&Config> for BcraTarget {
    fn from(config: &Config) -> Self {
        Self {
            form_url: config.bcra_form_url.clone(),
            captcha_url: config.bcra_captcha_url.clone(),
            form_timeout: config.form_timeout(),
            captcha_timeout: config.captcha_timeout(),
            submit_timeout: config.submit_timeout(),
        }
    }
}

/// Observable stage of a workflow, used in logs and failure reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowStage {
    /// Nothing fetched yet
    Idle,
    /// Form tokens captured, image not yet downloaded
    TokensObtained,
    /// Image and tokens ready, waiting for the solved text
    ChallengePending,
    /// Response received and extracted
    Submitted,
    /// A step failed; the session is gone
    Failed,
}

impl fmt::Display for WorkflowStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            WorkflowStage::Idle => "idle",
            WorkflowStage::TokensObtained => "tokens obtained",
            WorkflowStage::ChallengePending => "challenge pending",
            WorkflowStage::Submitted => "submitted",
            WorkflowStage::Failed => "failed",
        })
    }
}

/// A workflow that ended in the `Failed` stage.
#[derive(Debug, thiserror::Error)]
#[error("BCRA workflow failed while leaving stage '{stage}': {error}")]
pub struct WorkflowFailure {
    /// Last stage reached before the failure
    pub stage: WorkflowStage,
    /// What went wrong
    #[source]
    pub error: ScrapeError,
}

/// Workflow state: nothing fetched yet.
#[derive(Debug)]
pub struct Idle;

/// Workflow state: a challenge is waiting for its answer.
#[derive(Debug)]
pub struct ChallengePending {
    challenge: Challenge,
}

/// Workflow state: the form was submitted and the response extracted.
#[derive(Debug)]
pub struct Submitted {
    results: ResultSet,
}

/// One BCRA query bound to one session.
pub struct Workflow<T, S> {
    session: T,
    target: BcraTarget,
    state: S,
}

impl<T: SessionTransport> Workflow<T, Idle> {
    /// Starts a workflow on a fresh session.
    pub fn new(session: T, target: BcraTarget) -> Self {
        Self {
            session,
            target,
            state: Idle,
        }
    }

    /// Loads the form and the captcha image.
    ///
    /// # Errors
    ///
    /// Returns a [`WorkflowFailure`]; the session is dropped with it.
    pub async fn fetch_challenge(
        mut self,
    ) -> Result<Workflow<T, ChallengePending>, WorkflowFailure> {
        match start_challenge(&mut self.session, &self.target).await {
            Ok(challenge) => Ok(Workflow {
                session: self.session,
                target: self.target,
                state: ChallengePending { challenge },
            }),
            Err(error) => Err(fail(WorkflowStage::Idle, error)),
        }
    }
}

impl<T: SessionTransport> Workflow<T, ChallengePending> {
    /// The pending challenge; its image is what the solver has to read.
    pub fn challenge(&self) -> &Challenge {
        &self.state.challenge
    }

    /// Submits the answer to the pending challenge.
    ///
    /// # Errors
    ///
    /// Returns a [`WorkflowFailure`]; the session and challenge are dropped
    /// with it.
    pub async fn submit(
        mut self,
        cuit: &Cuit,
        solved_text: &str,
    ) -> Result<Workflow<T, Submitted>, WorkflowFailure> {
        let challenge = self.state.challenge;
        match submit(&mut self.session, &self.target, challenge, cuit, solved_text).await {
            Ok(results) => Ok(Workflow {
                session: self.session,
                target: self.target,
                state: Submitted { results },
            }),
            Err(error) => Err(fail(WorkflowStage::ChallengePending, error)),
        }
    }
}

impl<T> Workflow<T, Submitted> {
    /// Extracted records.
    pub fn results(&self) -> &ResultSet {
        &self.state.results
    }

    /// Ends the workflow, discarding the session.
    pub fn into_results(self) -> ResultSet {
        self.state.results
    }
}

impl<T: SessionTransport, S> Workflow<T, S> {
    /// Id of the session this workflow runs on.
    pub fn session_id(&self) -> crate::session::SessionId {
        self.session.id()
    }
}

fn fail(stage: WorkflowStage, error: ScrapeError) -> WorkflowFailure {
    warn!(
        "BCRA workflow: {} -> {} ({})",
        stage,
        WorkflowStage::Failed,
        error
    );
    WorkflowFailure { stage, error }
}
