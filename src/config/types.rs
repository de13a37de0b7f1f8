//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::config::constants::*;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Library configuration (no CLI dependencies).
///
/// Can be constructed programmatically; tests point the endpoint fields at a
/// local mock server.
///
/// # Examples
///
/// ```no_run
/// use fiscal_status::Config;
///
/// let config = Config {
///     probe_timeout_seconds: 5,
///     skip_bcra: true,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,

    /// HTTP User-Agent header value
    pub user_agent: String,

    /// BCRA form page (also the POST target)
    pub bcra_form_url: String,

    /// BCRA captcha image resource
    pub bcra_captcha_url: String,

    /// ARBA lookup URL template (`{cuit}` placeholder)
    pub arba_url_template: String,

    /// DGR Corrientes lookup URL template (`{cuit}` placeholder)
    pub corrientes_url_template: String,

    /// Rentas Córdoba page offered for manual verification
    pub cordoba_lookup_url: String,

    /// Form page timeout in seconds (capped at 20)
    pub form_timeout_seconds: u64,

    /// Captcha image timeout in seconds (capped at 20)
    pub captcha_timeout_seconds: u64,

    /// Submission timeout in seconds (capped at 20)
    pub submit_timeout_seconds: u64,

    /// Per-probe timeout in seconds (capped at 15)
    pub probe_timeout_seconds: u64,

    /// Where the CLI writes the captcha image
    pub captcha_path: PathBuf,

    /// Pre-solved captcha text (skips the interactive prompt)
    pub captcha_text: Option<String>,

    /// Only run the jurisdiction probes
    pub skip_bcra: bool,
}

impl Config {
    /// Timeout for the form page request.
    pub fn form_timeout(&self) -> Duration {
        Duration::from_secs(self.form_timeout_seconds).min(MAX_STEP_TIMEOUT)
    }

    /// Timeout for the captcha image request.
    pub fn captcha_timeout(&self) -> Duration {
        Duration::from_secs(self.captcha_timeout_seconds).min(MAX_STEP_TIMEOUT)
    }

    /// Timeout for the form submission.
    pub fn submit_timeout(&self) -> Duration {
        Duration::from_secs(self.submit_timeout_seconds).min(MAX_STEP_TIMEOUT)
    }

    /// Timeout for each jurisdiction probe.
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_seconds).min(MAX_PROBE_TIMEOUT)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            bcra_form_url: DEFAULT_BCRA_FORM_URL.to_string(),
            bcra_captcha_url: DEFAULT_BCRA_CAPTCHA_URL.to_string(),
            arba_url_template: DEFAULT_ARBA_URL_TEMPLATE.to_string(),
            corrientes_url_template: DEFAULT_CORRIENTES_URL_TEMPLATE.to_string(),
            cordoba_lookup_url: DEFAULT_CORDOBA_LOOKUP_URL.to_string(),
            form_timeout_seconds: FORM_TIMEOUT_SECS,
            captcha_timeout_seconds: CAPTCHA_TIMEOUT_SECS,
            submit_timeout_seconds: SUBMIT_TIMEOUT_SECS,
            probe_timeout_seconds: PROBE_TIMEOUT_SECS,
            captcha_path: PathBuf::from(DEFAULT_CAPTCHA_PATH),
            captcha_text: None,
            skip_bcra: false,
        }
    }
}

/// Command-line options.
///
/// # Examples
///
/// ```bash
/// # Full report, captcha answered interactively
/// fiscal_status 20123456789
///
/// # Probes only, JSON logs
/// fiscal_status 20-12345678-9 --skip-bcra --log-format json
///
/// # Scripted run with an OCR-provided answer
/// fiscal_status 20123456789 --captcha-text x7k2p
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "fiscal_status",
    about = "Consolidates public fiscal standing records for a CUIT."
)]
pub struct Opt {
    /// Taxpayer identifier (11 digits, dashes allowed as in 20-12345678-9)
    pub cuit: String,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// BCRA form page URL
    #[arg(long, env = "FISCAL_BCRA_FORM_URL", default_value = DEFAULT_BCRA_FORM_URL)]
    pub bcra_form_url: String,

    /// BCRA captcha image URL
    #[arg(long, env = "FISCAL_BCRA_CAPTCHA_URL", default_value = DEFAULT_BCRA_CAPTCHA_URL)]
    pub bcra_captcha_url: String,

    /// ARBA lookup URL template ({cuit} is substituted)
    #[arg(long, env = "FISCAL_ARBA_URL", default_value = DEFAULT_ARBA_URL_TEMPLATE)]
    pub arba_url_template: String,

    /// DGR Corrientes lookup URL template ({cuit} is substituted)
    #[arg(long, env = "FISCAL_CORRIENTES_URL", default_value = DEFAULT_CORRIENTES_URL_TEMPLATE)]
    pub corrientes_url_template: String,

    /// Form page timeout in seconds (max 20)
    #[arg(long, default_value_t = FORM_TIMEOUT_SECS)]
    pub form_timeout_seconds: u64,

    /// Captcha image timeout in seconds (max 20)
    #[arg(long, default_value_t = CAPTCHA_TIMEOUT_SECS)]
    pub captcha_timeout_seconds: u64,

    /// Submission timeout in seconds (max 20)
    #[arg(long, default_value_t = SUBMIT_TIMEOUT_SECS)]
    pub submit_timeout_seconds: u64,

    /// Per-probe timeout in seconds (max 15)
    #[arg(long, default_value_t = PROBE_TIMEOUT_SECS)]
    pub probe_timeout_seconds: u64,

    /// File the captcha image is written to
    #[arg(long, value_parser, default_value = DEFAULT_CAPTCHA_PATH)]
    pub captcha_path: PathBuf,

    /// Solved captcha text; when absent the answer is read from stdin
    #[arg(long)]
    pub captcha_text: Option<String>,

    /// Skip the BCRA rejected-cheques query and run only the provincial probes
    #[arg(long)]
    pub skip_bcra: bool,
}

impl From<Opt> for Config {
    fn from(opt: Opt) -> Self {
        Self {
            log_level: opt.log_level,
            log_format: opt.log_format,
            user_agent: opt.user_agent,
            bcra_form_url: opt.bcra_form_url,
            bcra_captcha_url: opt.bcra_captcha_url,
            arba_url_template: opt.arba_url_template,
            corrientes_url_template: opt.corrientes_url_template,
            cordoba_lookup_url: DEFAULT_CORDOBA_LOOKUP_URL.to_string(),
            form_timeout_seconds: opt.form_timeout_seconds,
            captcha_timeout_seconds: opt.captcha_timeout_seconds,
            submit_timeout_seconds: opt.submit_timeout_seconds,
            probe_timeout_seconds: opt.probe_timeout_seconds,
            captcha_path: opt.captcha_path,
            captcha_text: opt.captcha_text,
            skip_bcra: opt.skip_bcra,
        }
    }
}
