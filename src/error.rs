// ❗ Error taxonomy for ledger generation
//
// Both variants are configuration faults. Generation is all-or-nothing,
// so there is no partial result to recover.

use thiserror::Error;

/// Result alias for core ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LedgerError {
    /// Missing or invalid mapping, policy or period.
    #[error("configuration error [{key}]: {message}")]
    Configuration { key: String, message: String },

    /// Template amount range with min above max.
    #[error("range error: template '{template}' has invalid amount range {min:.2}..{max:.2}")]
    Range { template: String, min: f64, max: f64 },
}

impl LedgerError {
    pub fn configuration(key: impl Into<String>, message: impl Into<String>) -> Self {
        LedgerError::Configuration {
            key: key.into(),
            message: message.into(),
        }
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, LedgerError::Configuration { .. })
    }

    pub fn is_range(&self) -> bool {
        matches!(self, LedgerError::Range { .. })
    }
}
