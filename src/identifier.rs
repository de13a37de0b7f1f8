//! Taxpayer identifier (CUIT) validation.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error_handling::ScrapeError;

const CUIT_DIGITS: usize = 11;
/// Group lengths of the dashed form, e.g. `20-12345678-9`
const DASHED_GROUPS: [usize; 3] = [2, 8, 1];

/// A validated taxpayer identifier: exactly 11 ASCII digits.
///
/// Construction is the only validation point; every network operation takes a
/// `&Cuit`, so malformed input is rejected before any request is made.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Cuit(String);

impl Cuit {
    /// Parses an identifier.
    ///
    /// Surrounding whitespace is trimmed. The dashed form `NN-NNNNNNNN-N` is
    /// accepted and normalized; any other shape must be 11 bare digits.
    ///
    /// # Errors
    ///
    /// Returns `ScrapeError::InvalidInput` for anything else.
    pub fn parse(input: &str) -> Result<Self, ScrapeError> {
        let trimmed = input.trim();
        let digits = if trimmed.contains('-') {
            let groups: Vec<&str> = trimmed.split('-').collect();
            let lengths: Vec<usize> = groups.iter().map(|g| g.len()).collect();
            if lengths != DASHED_GROUPS {
                return Err(invalid(input));
            }
            groups.concat()
        } else {
            trimmed.to_string()
        };

        if digits.len() != CUIT_DIGITS || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid(input));
        }
        Ok(Cuit(digits))
    }

    /// The 11 digits, without separators.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn invalid(input: &str) -> ScrapeError {
    ScrapeError::InvalidInput(format!(
        "CUIT must be exactly {CUIT_DIGITS} digits, got {input:?}"
    ))
}

impl FromStr for Cuit {
    type Err = ScrapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Cuit::parse(s)
    }
}

impl fmt::Display for Cuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Cuit {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
