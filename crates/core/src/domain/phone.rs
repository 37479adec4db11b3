// Phone Number Validation

use crate::domain::error::{DomainError, Result};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// International format: optional + or 00 prefix followed by digits only.
/// Length bounds (10-13 including the prefix) are checked separately so the
/// caller gets a precise message.
static PHONE_RE: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"^(?:\+|00)?[1-9][0-9]+$").expect("phone regex"));

const MIN_LEN: usize = 10;
const MAX_LEN: usize = 13;

/// Validated phone number (E.164-ish, as entered by the client)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Phone(String);

impl Phone {
    /// Parse and validate a raw phone string.
    ///
    /// Rejects anything outside 10-13 characters or not matching the
    /// international grammar.
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.len() < MIN_LEN || trimmed.len() > MAX_LEN {
            return Err(DomainError::InvalidPhone(format!(
                "phone number must be {MIN_LEN} to {MAX_LEN} characters, got {}",
                trimmed.len()
            )));
        }
        if !PHONE_RE.is_match(trimmed) {
            return Err(DomainError::InvalidPhone(format!(
                "phone number is not in international format: {trimmed}"
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Wrap a string already known to be valid (e.g. read back from the store).
    pub fn from_trusted(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Phone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_international_numbers() {
        assert!(Phone::parse("+33600000001").is_ok());
        assert!(Phone::parse("0033612345678").is_ok());
        assert!(Phone::parse("33612345678").is_ok());
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(Phone::parse("+336").is_err());
        assert!(Phone::parse("+3360000000000001").is_err());
        assert!(Phone::parse("").is_err());
    }

    #[test]
    fn rejects_non_numeric() {
        assert!(Phone::parse("+33six00001").is_err());
        assert!(Phone::parse("06 12 34 56 7").is_err());
    }

    #[test]
    fn rejects_leading_zero_after_prefix() {
        assert!(Phone::parse("+03360000001").is_err());
    }

    #[test]
    fn trims_whitespace() {
        let phone = Phone::parse("  +33600000001  ").unwrap();
        assert_eq!(phone.as_str(), "+33600000001");
    }
}
