//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `fiscal_status` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - Printing the report as JSON
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use fiscal_status::config::Opt;
use fiscal_status::initialization::{init_crypto_provider, init_logger_with};
use fiscal_status::{run_report, Config, Cuit, FixedSolver, ReportBundle, StdinSolver};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file (if it exists)
    // Try loading from current directory first, then from the executable's directory
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    let opt = Opt::parse();

    // Reject a malformed identifier before anything touches the network
    let cuit = match Cuit::parse(&opt.cuit) {
        Ok(cuit) => cuit,
        Err(e) => {
            eprintln!("fiscal_status error: {}", e);
            process::exit(1);
        }
    };
    let config = Config::from(opt);

    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    // Initialize crypto provider for TLS operations
    init_crypto_provider();

    match run(&config, &cuit).await {
        Ok(report) => {
            let json =
                serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
            println!("{}", json);
            Ok(())
        }
        Err(e) => {
            eprintln!("fiscal_status error: {:#}", e);
            process::exit(1);
        }
    }
}

async fn run(config: &Config, cuit: &Cuit) -> Result<ReportBundle> {
    match &config.captcha_text {
        Some(text) => run_report(config, cuit, &mut FixedSolver(text.clone())).await,
        None => run_report(config, cuit, &mut StdinSolver::new(&config.captcha_path)).await,
    }
}
