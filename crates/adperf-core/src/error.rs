// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use thiserror::Error;

/// Workspace-wide error type.
///
/// The analysis pipeline is fail-soft: statistical degeneracies (short
/// series, zero variance, missing metrics) produce neutral results rather
/// than errors. `AdperfError` is reserved for malformed configuration and
/// for collaborator lookups that come back empty.
#[derive(Debug, Error)]
pub enum AdperfError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("not found: {0}")]
    NotFound(String),
}

impl AdperfError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::AdperfError;

    #[test]
    fn invalid_input_formats_message() {
        let err = AdperfError::invalid_input("lookback_days must be >= 1");
        assert_eq!(err.to_string(), "invalid input: lookback_days must be >= 1");
    }

    #[test]
    fn not_found_formats_message() {
        let err = AdperfError::not_found("campaign cmp-42 has no metrics");
        assert_eq!(err.to_string(), "not found: campaign cmp-42 has no metrics");
    }
}
