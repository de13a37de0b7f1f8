//! fiscal_status library: public fiscal standing lookups for a CUIT
//!
//! This library queries the BCRA rejected-cheques registry through its
//! captcha-protected form and probes the provincial tax agencies (ARBA, DGR
//! Corrientes, Rentas Córdoba), then assembles everything into a
//! [`ReportBundle`] that serializes to JSON.
//!
//! # Example
//!
//! ```no_run
//! use fiscal_status::{run_report, Config, Cuit, FixedSolver};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::default();
//! let cuit = Cuit::parse("20-12345678-9")?;
//! let mut solver = FixedSolver("x7k2p".to_string());
//!
//! let report = run_report(&config, &cuit, &mut solver).await?;
//! println!("{}", serde_json::to_string_pretty(&report)?);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

#![warn(missing_docs)]

pub mod app;
pub mod config;
mod error_handling;
mod identifier;
pub mod initialization;
mod models;
pub mod parse;
pub mod probe;
pub mod session;
mod tls;
mod utils;
pub mod workflow;

// Re-export public API
pub use app::{CaptchaSolver, FixedSolver, StdinSolver};
pub use config::{Config, LogFormat, LogLevel};
pub use error_handling::{
    categorize_reqwest_error, ErrorType, ExtractionMiss, ExtractionStats, InitializationError,
    ScrapeError,
};
pub use identifier::Cuit;
pub use models::{RejectedInstrumentRecord, ReportBundle, ResultSet, TokenSet};
pub use run::{query_bcra, run_report};
pub use tls::relaxed_client_config;

// Internal run module (drives one report end-to-end)
mod run {
    use anyhow::{Context, Result};
    use chrono::Utc;
    use log::info;

    use crate::app::{print_report_summary, CaptchaSolver};
    use crate::config::Config;
    use crate::identifier::Cuit;
    use crate::initialization::build_client;
    use crate::models::{ReportBundle, ResultSet};
    use crate::probe::{default_probes, run_probes};
    use crate::session::Session;
    use crate::workflow::{BcraTarget, Workflow};

    /// Builds the full report for one identifier.
    ///
    /// The jurisdiction probes run concurrently with the BCRA workflow. Probe
    /// failures are reported inside the bundle; a BCRA failure fails the whole
    /// report, since a partial bundle would read as "no rejected cheques".
    ///
    /// # Arguments
    ///
    /// * `config` - Endpoints, timeouts and the `skip_bcra` switch
    /// * `cuit` - Validated identifier
    /// * `solver` - Reads the captcha; unused when `skip_bcra` is set
    ///
    /// # Errors
    ///
    /// Returns an error if no HTTP client can be built, the BCRA workflow
    /// fails, or the solver fails.
    pub async fn run_report<S: CaptchaSolver>(
        config: &Config,
        cuit: &Cuit,
        solver: &mut S,
    ) -> Result<ReportBundle> {
        let consulted_at = Utc::now();
        info!("Consulting fiscal status for CUIT {}", cuit);

        let probe_client = build_client(config).context("Failed to build probe HTTP client")?;
        let probes = default_probes(config);

        let bcra = async {
            if config.skip_bcra {
                info!("Skipping BCRA query");
                return Ok(None);
            }
            query_bcra(config, cuit, solver).await.map(Some)
        };
        let (jurisdictions, bcra) = tokio::join!(
            run_probes(&probes, &probe_client, cuit, config.probe_timeout()),
            bcra
        );

        let report = ReportBundle {
            identifier: cuit.clone(),
            consulted_at,
            bcra: bcra?,
            jurisdictions,
        };
        print_report_summary(&report);
        Ok(report)
    }

    /// Runs one BCRA workflow on a fresh session.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be opened, any workflow step
    /// fails, or the solver fails. Retrying means calling this again.
    pub async fn query_bcra<S: CaptchaSolver>(
        config: &Config,
        cuit: &Cuit,
        solver: &mut S,
    ) -> Result<ResultSet> {
        let session = Session::new(config).context("Failed to open BCRA session")?;
        let pending = Workflow::new(session, BcraTarget::from(config))
            .fetch_challenge()
            .await?;

        let answer = solver
            .solve(pending.challenge().image())
            .await
            .context("Failed to solve captcha")?;

        let submitted = pending.submit(cuit, &answer).await?;
        Ok(submitted.into_results())
    }
}
