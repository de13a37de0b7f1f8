//! Captcha solvers.
//!
//! Reading the captcha is left to a human or an external OCR tool; a solver
//! only moves the image out and the answer back in.

use std::future::Future;
use std::path::PathBuf;

use anyhow::{Context, Result};
use log::info;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

/// Produces the text shown in a captcha image.
pub trait CaptchaSolver {
    /// Returns the characters shown in `image`.
    fn solve(&mut self, image: &[u8]) -> impl Future<Output = Result<String>> + Send;
}

/// Writes the image to a file and reads the answer from stdin.
#[derive(Debug, Clone)]
pub struct StdinSolver {
    image_path: PathBuf,
}

impl StdinSolver {
    /// Solver that writes each image to `image_path`.
    pub fn new(image_path: impl Into<PathBuf>) -> Self {
        Self {
            image_path: image_path.into(),
        }
    }
}

impl CaptchaSolver for StdinSolver {
    async fn solve(&mut self, image: &[u8]) -> Result<String> {
        tokio::fs::write(&self.image_path, image)
            .await
            .with_context(|| format!("Failed to write captcha image to {:?}", self.image_path))?;
        info!("Captcha image saved to {}", self.image_path.display());

        // Prompt on stderr so stdout stays clean for the JSON report.
        let mut stderr = tokio::io::stderr();
        stderr
            .write_all(
                format!(
                    "Open {} and type the characters shown: ",
                    self.image_path.display()
                )
                .as_bytes(),
            )
            .await?;
        stderr.flush().await?;

        let mut answer = String::new();
        let read = BufReader::new(tokio::io::stdin())
            .read_line(&mut answer)
            .await
            .context("Failed to read captcha answer from stdin")?;
        if read == 0 {
            anyhow::bail!("stdin closed before a captcha answer was entered");
        }
        Ok(answer.trim().to_string())
    }
}

/// Returns a pre-solved answer without looking at the image.
#[derive(Debug, Clone)]
pub struct FixedSolver(pub String);

impl CaptchaSolver for FixedSolver {
    async fn solve(&mut self, _image: &[u8]) -> Result<String> {
        Ok(self.0.clone())
    }
}
