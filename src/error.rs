// src/error.rs

use thiserror::Error;

/// Errors raised while turning reference data into yearly series.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DutyError {
    /// The requested country is not one of the configured trading partners.
    #[error("unknown country: {0}")]
    UnknownCountry(String),

    /// A reference entry cannot be used to generate a series.
    #[error("invalid configuration for {entry}: {reason}")]
    InvalidConfiguration { entry: String, reason: String },
}

impl DutyError {
    pub fn invalid(entry: impl Into<String>, reason: impl Into<String>) -> Self {
        DutyError::InvalidConfiguration {
            entry: entry.into(),
            reason: reason.into(),
        }
    }

    /// Name of the country or entry the error refers to.
    pub fn entry(&self) -> &str {
        match self {
            DutyError::UnknownCountry(name) => name,
            DutyError::InvalidConfiguration { entry, .. } => entry,
        }
    }
}
