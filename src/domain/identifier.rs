//! Dealer identifier: the subdomain slug a caller submits.

use crate::error::{AppError, INVALID_IDENTIFIER_MESSAGE};
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// Compiled regex for the identifier alphabet.
static IDENTIFIER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9-]+$").unwrap());

/// Returns true if `input`, once trimmed, is a non-empty run of lowercase
/// ASCII letters, digits and hyphens.
///
/// Uppercase input is rejected, not folded.
pub fn validate(input: &str) -> bool {
    IDENTIFIER_REGEX.is_match(input.trim())
}

/// A validated dealer identifier.
///
/// Can only be obtained through [`Identifier::parse`], so holding one means the
/// value is safe to splice into a hostname without escaping.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier(String);

impl Identifier {
    /// Trims and validates raw input.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidInput`] for empty or non-conforming input.
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let trimmed = raw.trim();
        if !validate(trimmed) {
            return Err(AppError::invalid_input(INVALID_IDENTIFIER_MESSAGE));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
