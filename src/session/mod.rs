//! Session store for one workflow instance.
//!
//! A [`Session`] owns the cookie jar (through its own client) for exactly one
//! workflow. Requests go through the [`SessionTransport`] trait, whose methods
//! take `&mut self`: a session can only have one request in flight, and two
//! workflows can never share one.
//!
//! Dropping a session discards its cookies and closes its pooled connections.

use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use log::debug;
use serde::Serialize;

use crate::config::Config;
use crate::error_handling::{InitializationError, ScrapeError};
use crate::initialization::build_client;

static NEXT_SESSION_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identifier of a session.
///
/// Artifacts derived from a session (challenges) carry its id so that using
/// them on another session is detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SessionId(u64);

impl SessionId {
    /// Allocates a fresh id. Never returns the same value twice in a process.
    pub fn next() -> Self {
        SessionId(NEXT_SESSION_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A fully read HTTP response.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// HTTP status code
    pub status: u16,
    /// Final URL after redirects
    pub url: String,
    /// Response body
    pub body: Vec<u8>,
}

impl RawResponse {
    /// True for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body decoded as text; invalid UTF-8 is replaced rather than rejected.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Request interface of a session.
///
/// Implemented by [`Session`] and by test doubles. Transport failures and
/// timeouts are reported as `ScrapeError::Connection`; non-success statuses
/// are returned as responses and judged by the caller.
pub trait SessionTransport {
    /// Id of this session.
    fn id(&self) -> SessionId;

    /// Issues a GET through the session.
    fn get(
        &mut self,
        url: &str,
        timeout: Duration,
    ) -> impl Future<Output = Result<RawResponse, ScrapeError>> + Send;

    /// Issues a form-encoded POST through the session.
    fn post_form(
        &mut self,
        url: &str,
        form: &[(String, String)],
        timeout: Duration,
    ) -> impl Future<Output = Result<RawResponse, ScrapeError>> + Send;
}

/// HTTP session backed by a legacy-compatible client with its own cookie jar.
pub struct Session {
    id: SessionId,
    client: reqwest::Client,
}

impl Session {
    /// Opens a new session with an empty cookie jar.
    ///
    /// # Errors
    ///
    /// Returns an `InitializationError` if no client can be built.
    pub fn new(config: &Config) -> Result<Self, InitializationError> {
        let session = Session {
            id: SessionId::next(),
            client: build_client(config)?,
        };
        debug!("Opened session {}", session.id);
        Ok(session)
    }

    async fn execute(
        &mut self,
        request: reqwest::RequestBuilder,
        url: &str,
        timeout: Duration,
    ) -> Result<RawResponse, ScrapeError> {
        let response = request
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| ScrapeError::connection(url, e))?;

        let status = response.status().as_u16();
        let final_url = response.url().to_string();
        let body = response
            .bytes()
            .await
            .map_err(|e| ScrapeError::connection(url, e))?;

        debug!(
            "Session {}: {} -> HTTP {} ({} bytes)",
            self.id,
            url,
            status,
            body.len()
        );

        Ok(RawResponse {
            status,
            url: final_url,
            body: body.to_vec(),
        })
    }
}

impl SessionTransport for Session {
    fn id(&self) -> SessionId {
        self.id
    }

    async fn get(&mut self, url: &str, timeout: Duration) -> Result<RawResponse, ScrapeError> {
        let request = self.client.get(url);
        self.execute(request, url, timeout).await
    }

    async fn post_form(
        &mut self,
        url: &str,
        form: &[(String, String)],
        timeout: Duration,
    ) -> Result<RawResponse, ScrapeError> {
        let request = self.client.post(url).form(form);
        self.execute(request, url, timeout).await
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        debug!("Discarded session {}", self.id);
    }
}
