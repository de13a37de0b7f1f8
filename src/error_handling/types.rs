//! Error type definitions.
//!
//! This module defines the surfaced error kinds of the scraping core, the
//! categories used to describe transport failures, and the absorbed
//! per-row extraction misses.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use serde::Serialize;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

use crate::session::SessionId;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client, including the fallback configuration.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),

    /// Error building the fallback `rustls` configuration.
    #[error("TLS configuration error: {0}")]
    TlsConfigError(#[from] rustls::Error),
}

/// Errors surfaced by the scraping core.
///
/// Every variant except `InvalidInput` means the workflow has to restart from
/// a fresh session and a fresh challenge.
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// Network or timeout failure on an outbound call.
    #[error("Connection error for {url}: {kind}")]
    Connection {
        /// Requested URL
        url: String,
        /// Failure category
        kind: ErrorType,
        /// Underlying transport error, when one exists
        #[source]
        source: Option<ReqwestError>,
    },

    /// A required resource answered with a non-success status.
    #[error("Upstream unavailable: {url} returned HTTP {status}")]
    UpstreamUnavailable {
        /// Requested URL
        url: String,
        /// HTTP status code
        status: u16,
    },

    /// Malformed input, rejected before any network call.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A challenge was submitted through a session other than the one that
    /// produced it. Its tokens are bound to the other session's server state.
    #[error("Challenge from session {challenge_session} submitted through session {session}")]
    StaleChallenge {
        /// Session that fetched the challenge
        challenge_session: SessionId,
        /// Session the submission was attempted on
        session: SessionId,
    },
}

impl ScrapeError {
    /// Wraps a transport error, keeping its category.
    pub fn connection(url: &str, error: ReqwestError) -> Self {
        ScrapeError::Connection {
            url: url.to_string(),
            kind: super::categorize_reqwest_error(&error),
            source: Some(error),
        }
    }

    /// Returns true for failures caused by the network rather than by input.
    pub fn is_connection(&self) -> bool {
        matches!(self, ScrapeError::Connection { .. })
    }
}

/// Categories of transport failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorType {
    /// The request could not be built (usually a malformed URL)
    HttpRequestBuilderError,
    /// Redirect loop or too many redirects
    HttpRequestRedirectError,
    /// The request or its body exceeded the time budget
    HttpRequestTimeoutError,
    /// Failure while sending the request
    HttpRequestRequestError,
    /// TCP or TLS connection could not be established
    HttpRequestConnectError,
    /// Failure while reading the response body
    HttpRequestBodyError,
    /// Response body could not be decoded
    HttpRequestDecodeError,
    /// Anything reqwest does not classify
    HttpRequestOtherError,
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ErrorType {
    /// Human-readable description used in logs and probe notes.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::HttpRequestBuilderError => "HTTP request builder error",
            ErrorType::HttpRequestRedirectError => "HTTP request redirect error",
            ErrorType::HttpRequestTimeoutError => "HTTP request timeout error",
            ErrorType::HttpRequestRequestError => "HTTP request error",
            ErrorType::HttpRequestConnectError => "HTTP request connect error",
            ErrorType::HttpRequestBodyError => "HTTP request body error",
            ErrorType::HttpRequestDecodeError => "HTTP request decode error",
            ErrorType::HttpRequestOtherError => "HTTP request other error",
        }
    }
}

/// Reasons a table row was left out of the result set.
///
/// These are never surfaced as errors; they are counted in
/// [`ExtractionStats`](super::ExtractionStats) and logged at debug level.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIterMacro, Serialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMiss {
    /// Row has fewer than four cells
    TooFewCells,
    /// No cell contains a known rejection reason
    NoReasonCell,
    /// The reason is something other than insufficient funds
    ReasonNotInsufficientFunds,
    /// The amount cell does not parse as a decimal number
    UnparseableAmount,
}

impl std::fmt::Display for ExtractionMiss {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ExtractionMiss::TooFewCells => "row has fewer than 4 cells",
            ExtractionMiss::NoReasonCell => "no reason cell",
            ExtractionMiss::ReasonNotInsufficientFunds => "reason is not insufficient funds",
            ExtractionMiss::UnparseableAmount => "unparseable amount",
        })
    }
}
