//! Jurisdiction probes.
//!
//! Each probe is one stateless GET against a provincial lookup page whose body
//! is classified by keyword. Probes never return errors: connection failures,
//! timeouts and non-success statuses all become `UNAVAILABLE`, so one broken
//! portal cannot hide the others.

mod classify;

use std::time::Duration;

use futures::future::join_all;
use serde::Serialize;
use url::Url;

use crate::config::{Config, CUIT_PLACEHOLDER};
use crate::error_handling::categorize_reqwest_error;
use crate::identifier::Cuit;

pub use classify::{classify, Markers};

/// Secondary data sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JurisdictionId {
    /// Agencia de Recaudación de la Provincia de Buenos Aires
    Arba,
    /// Dirección General de Rentas de Corrientes
    Corrientes,
    /// Dirección General de Rentas de Córdoba
    Cordoba,
}

/// Coarse outcome of a probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Classification {
    /// Nothing on record
    Clear,
    /// Something on record; details on the lookup page
    Flagged,
    /// The portal could not be reached or answered with an error
    Unavailable,
    /// The portal answered but the page has to be read by a person
    ManualReviewRequired,
}

/// Result of one probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JurisdictionStatus {
    /// Probed jurisdiction
    pub jurisdiction_id: JurisdictionId,
    /// Outcome of the probe
    pub classification: Classification,
    /// Matched marker, HTTP status or failure description
    pub raw_note: String,
    /// Public page a human can open to verify
    pub lookup_url: Option<String>,
}

/// A GET-and-classify probe against a URL template.
#[derive(Debug, Clone)]
pub struct KeywordProbe {
    /// Probed jurisdiction
    pub id: JurisdictionId,
    /// Lookup URL with a `{cuit}` placeholder
    pub url_template: String,
    /// Keywords deciding the classification
    pub markers: Markers,
}

/// A jurisdiction whose site cannot be scraped; only the lookup URL is
/// reported.
#[derive(Debug, Clone)]
pub struct ManualProbe {
    /// Jurisdiction
    pub id: JurisdictionId,
    /// Page offered for manual verification
    pub lookup_url: String,
}

/// One jurisdiction's lookup strategy.
#[derive(Debug, Clone)]
pub enum Probe {
    /// Fetch and classify by keyword
    Keyword(KeywordProbe),
    /// Report the lookup URL without fetching
    Manual(ManualProbe),
}

const ARBA_MARKERS: Markers = Markers {
    clear: &["No registra deuda", "SIN DEUDA"],
    flagged: &["Total de Deuda"],
    otherwise: Classification::ManualReviewRequired,
};

// Corrientes answers with the taxpayer's record when one exists.
const CORRIENTES_MARKERS: Markers = Markers {
    clear: &["No se registran datos", "inexistente"],
    flagged: &[],
    otherwise: Classification::Flagged,
};

/// ARBA, Corrientes and Córdoba, in report order.
pub fn default_probes(config: &Config) -> Vec<Probe> {
    vec![
        Probe::Keyword(KeywordProbe {
            id: JurisdictionId::Arba,
            url_template: config.arba_url_template.clone(),
            markers: ARBA_MARKERS,
        }),
        Probe::Keyword(KeywordProbe {
            id: JurisdictionId::Corrientes,
            url_template: config.corrientes_url_template.clone(),
            markers: CORRIENTES_MARKERS,
        }),
        Probe::Manual(ManualProbe {
            id: JurisdictionId::Cordoba,
            lookup_url: config.cordoba_lookup_url.clone(),
        }),
    ]
}

impl Probe {
    /// Jurisdiction this probe reports on.
    pub fn id(&self) -> JurisdictionId {
        match self {
            Probe::Keyword(probe) => probe.id,
            Probe::Manual(probe) => probe.id,
        }
    }

    /// Runs the probe. The whole exchange, body included, is bounded by
    /// `timeout`.
    pub async fn run(
        &self,
        client: &reqwest::Client,
        cuit: &Cuit,
        timeout: Duration,
    ) -> JurisdictionStatus {
        let status = match self {
            Probe::Keyword(probe) => probe.run(client, cuit, timeout).await,
            Probe::Manual(probe) => JurisdictionStatus {
                jurisdiction_id: probe.id,
                classification: Classification::ManualReviewRequired,
                raw_note: "interactive site; verify manually".to_string(),
                lookup_url: Some(probe.lookup_url.clone()),
            },
        };
        log::info!(
            "Probe {:?}: {:?} ({})",
            status.jurisdiction_id,
            status.classification,
            status.raw_note
        );
        status
    }
}

impl KeywordProbe {
    /// Lookup URL for `cuit`, or `None` if the template is not a valid URL.
    pub fn lookup_url(&self, cuit: &Cuit) -> Option<Url> {
        Url::parse(&self.url_template.replace(CUIT_PLACEHOLDER, cuit.as_str())).ok()
    }

    async fn run(
        &self,
        client: &reqwest::Client,
        cuit: &Cuit,
        timeout: Duration,
    ) -> JurisdictionStatus {
        let Some(url) = self.lookup_url(cuit) else {
            return self.unavailable(None, format!("invalid lookup URL {:?}", self.url_template));
        };

        let (classification, raw_note) =
            match tokio::time::timeout(timeout, fetch_text(client, url.as_str())).await {
                Ok(Ok((status, body))) if (200..300).contains(&status) => {
                    classify(&body, &self.markers)
                }
                Ok(Ok((status, _))) => (Classification::Unavailable, format!("HTTP {status}")),
                Ok(Err(e)) => {
                    log::debug!("Probe {:?} failed for {}: {}", self.id, url, e);
                    (
                        Classification::Unavailable,
                        categorize_reqwest_error(&e).to_string(),
                    )
                }
                Err(_) => (
                    Classification::Unavailable,
                    format!("timed out after {}s", timeout.as_secs()),
                ),
            };

        JurisdictionStatus {
            jurisdiction_id: self.id,
            classification,
            raw_note,
            lookup_url: Some(url.to_string()),
        }
    }

    fn unavailable(&self, lookup_url: Option<String>, note: String) -> JurisdictionStatus {
        JurisdictionStatus {
            jurisdiction_id: self.id,
            classification: Classification::Unavailable,
            raw_note: note,
            lookup_url,
        }
    }
}

async fn fetch_text(client: &reqwest::Client, url: &str) -> Result<(u16, String), reqwest::Error> {
    let response = client.get(url).send().await?;
    let status = response.status().as_u16();
    let body = response.text().await?;
    Ok((status, body))
}

/// Runs every probe concurrently and returns their statuses in probe order.
pub async fn run_probes(
    probes: &[Probe],
    client: &reqwest::Client,
    cuit: &Cuit,
    timeout: Duration,
) -> Vec<JurisdictionStatus> {
    join_all(probes.iter().map(|probe| probe.run(client, cuit, timeout))).await
}
