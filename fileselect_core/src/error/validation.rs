//! Validation related error types

use thiserror::Error;

use super::rule::RuleError;

/// Matching criteria that cannot be used for selection
#[derive(Error, Debug)]
pub enum ValidationError {
    /// No include pattern was configured
    #[error("Invalid criteria: at least one include pattern is required")]
    NoIncludePatterns,

    /// An include or exclude pattern is not valid glob syntax
    #[error("Invalid glob pattern '{pattern}': {reason}")]
    InvalidGlob { pattern: String, reason: String },

    /// Sort rules were configured without an extraction regex
    #[error("Invalid criteria: 'regex' must be specified when 'sort_by' is non-empty")]
    MissingRegex,

    /// The extraction regex does not compile
    #[error("Invalid extraction regex: {reason}")]
    InvalidRegex { reason: String },

    /// A sort rule was rejected by its factory
    #[error(transparent)]
    SortRule(#[from] RuleError),
}

impl ValidationError {
    /// Create an invalid glob error
    pub fn invalid_glob(pattern: &str, reason: impl ToString) -> Self {
        Self::InvalidGlob {
            pattern: pattern.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create an invalid regex error
    pub fn invalid_regex(reason: impl ToString) -> Self {
        Self::InvalidRegex {
            reason: reason.to_string(),
        }
    }
}
