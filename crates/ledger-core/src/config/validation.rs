//! Configuration validation utilities and rules

use crate::LedgerError;
use thiserror::Error;

/// Configuration validation result
pub type ValidationResult = Result<(), ValidationError>;

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Value format is invalid
    #[error("Field '{field}' has invalid format. Expected: {expected}, got: {actual}")]
    InvalidFormat {
        /// Field path
        field: String,
        /// Description of the accepted format
        expected: String,
        /// Value supplied
        actual: String,
    },
}

impl From<ValidationError> for LedgerError {
    fn from(err: ValidationError) -> Self {
        LedgerError::invalid(err.to_string())
    }
}

/// Formats understood by [`ConfigValidator::format`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldFormat {
    /// Bech32 human readable part: 1-83 lowercase ASCII letters or digits
    Bech32Prefix,
}

impl FieldFormat {
    fn describe(self) -> &'static str {
        match self {
            FieldFormat::Bech32Prefix => "1-83 lowercase ascii letters or digits",
        }
    }

    fn accepts(self, value: &str) -> bool {
        match self {
            FieldFormat::Bech32Prefix => {
                (1..=83).contains(&value.len())
                    && value
                        .bytes()
                        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
            }
        }
    }
}

/// Configuration validator that accumulates validation rules
#[derive(Debug, Default)]
pub struct ConfigValidator {
    errors: Vec<ValidationError>,
}

impl ConfigValidator {
    /// Create a new validator
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate string format
    pub fn format(&mut self, field_name: &str, value: &str, format: FieldFormat) -> &mut Self {
        if !format.accepts(value) {
            self.errors.push(ValidationError::InvalidFormat {
                field: field_name.to_string(),
                expected: format.describe().to_string(),
                actual: value.to_string(),
            });
        }
        self
    }

    /// First error, if any
    pub fn result(self) -> ValidationResult {
        match self.errors.into_iter().next() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_format() {
        let mut v = ConfigValidator::new();
        v.format("address_prefix", "pb", FieldFormat::Bech32Prefix);
        assert!(v.result().is_ok());

        let mut v = ConfigValidator::new();
        v.format("address_prefix", "", FieldFormat::Bech32Prefix)
            .format("address_prefix", &"a".repeat(84), FieldFormat::Bech32Prefix);
        assert_matches::assert_matches!(
            v.result(),
            Err(ValidationError::InvalidFormat { actual, .. }) if actual.is_empty()
        );
    }

    #[test]
    fn test_uppercase_prefix_message() {
        let mut v = ConfigValidator::new();
        v.format("address_prefix", "PB", FieldFormat::Bech32Prefix);
        let err: LedgerError = v.result().unwrap_err().into();
        assert_eq!(
            err.to_string(),
            "Invalid: Field 'address_prefix' has invalid format. \
             Expected: 1-83 lowercase ascii letters or digits, got: PB"
        );
    }
}
