//! Configuration constants.
//!
//! Timeouts, upstream endpoints and form field names used by the BCRA flow and
//! the jurisdiction probes. Every endpoint here is only a default and can be
//! overridden through [`crate::Config`].

use std::time::Duration;

// Step timeouts for the BCRA flow
/// Timeout for loading the form page
pub const FORM_TIMEOUT_SECS: u64 = 20;
/// Timeout for downloading the captcha image
pub const CAPTCHA_TIMEOUT_SECS: u64 = 20;
/// Timeout for posting the solved form
pub const SUBMIT_TIMEOUT_SECS: u64 = 20;
/// Upper bound for any single BCRA step, whatever the configuration says
pub const MAX_STEP_TIMEOUT: Duration = Duration::from_secs(20);

// Jurisdiction probes
/// Default per-probe timeout
pub const PROBE_TIMEOUT_SECS: u64 = 10;
/// Upper bound for a probe timeout; one slow portal must not stall the report
pub const MAX_PROBE_TIMEOUT: Duration = Duration::from_secs(15);

/// TCP connect timeout shared by every client
pub const TCP_CONNECT_TIMEOUT_SECS: u64 = 5;

/// Maximum accepted length of the solved captcha text
pub const MAX_CAPTCHA_TEXT_LEN: usize = 32;

/// Default User-Agent string for HTTP requests.
///
/// The legacy portals serve a degraded page (or nothing) to clients that do not
/// look like a desktop browser. Can be overridden with `--user-agent`.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

// Upstream endpoints
/// BCRA rejected-cheques query form (GET for the form, POST for the submission)
pub const DEFAULT_BCRA_FORM_URL: &str =
    "https://www.bcra.gob.ar/BCRAyVos/Cheques_rechazados.aspx";
/// Captcha image served for the form session
pub const DEFAULT_BCRA_CAPTCHA_URL: &str = "https://www.bcra.gob.ar/BCRAyVos/Captcha.aspx";
/// ARBA public debt lookup; `{cuit}` is replaced by the identifier
pub const DEFAULT_ARBA_URL_TEMPLATE: &str = "https://consultas.arba.gov.ar/ConsultasGenerales/recuperarEstadoDeuda.do?action=recuperarEstadoDeuda&cuit={cuit}";
/// DGR Corrientes taxpayer page; `{cuit}` is replaced by the identifier
pub const DEFAULT_CORRIENTES_URL_TEMPLATE: &str =
    "https://www.dgrcorrientes.gob.ar/Informacionutil/gestiontransparente/consultacontribuyente/{cuit}";
/// Rentas Córdoba self-service page (interactive, never scraped)
pub const DEFAULT_CORDOBA_LOOKUP_URL: &str =
    "https://www.rentascordoba.gob.ar/gestiones/consulta/situacion-fiscal";

/// Placeholder substituted with the identifier in probe URL templates
pub const CUIT_PLACEHOLDER: &str = "{cuit}";

// Form fields
/// Anti-forgery view state emitted by the form page
pub const VIEWSTATE_FIELD: &str = "__VIEWSTATE";
/// Event validation token emitted by the form page
pub const EVENT_VALIDATION_FIELD: &str = "__EVENTVALIDATION";
/// Page generator identifier emitted by the form page
pub const VIEWSTATE_GENERATOR_FIELD: &str = "__VIEWSTATEGENERATOR";
/// Hidden fields carried from the form page into the submission
pub const WELL_KNOWN_TOKEN_FIELDS: [&str; 3] = [
    VIEWSTATE_FIELD,
    EVENT_VALIDATION_FIELD,
    VIEWSTATE_GENERATOR_FIELD,
];
/// Form field carrying the taxpayer identifier
pub const IDENTIFIER_FIELD: &str = "txtCuit";
/// Form field carrying the solved captcha text
pub const CAPTCHA_FIELD: &str = "txtCaptcha";
/// Postback markers that make the server treat the POST as a button click
pub const SUBMIT_ACTION_FIELDS: [(&str, &str); 3] = [
    ("__EVENTTARGET", ""),
    ("__EVENTARGUMENT", ""),
    ("btnConsultar", "Consultar"),
];

/// Default location the CLI writes the captcha image to
pub const DEFAULT_CAPTCHA_PATH: &str = "./captcha.png";
