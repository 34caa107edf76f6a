//! Sort rule errors and their aggregation
//!
//! A failing sort rule never stops the rules after it. Configuration kinds
//! (`UnknownGroup`, `MissingLayout`, `InvalidLayout`, `UnknownLocation`,
//! `InvalidRegex`) leave the working order untouched for that rule; key kinds
//! (`KeyParse`, `MissingKey`) are reported while the rule still applies its
//! fallback ordering.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::criteria::SortType;

/// Error raised by a single sort rule
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    /// The rule references a capture group the extraction regex does not define
    #[error("sort rule {index} ({sort_type}): capture group '{group}' is not defined in the extraction regex")]
    UnknownGroup {
        index: usize,
        sort_type: SortType,
        group: String,
    },

    /// Timestamp rule without a layout
    #[error("sort rule {index} (timestamp): 'layout' must be specified")]
    MissingLayout { index: usize },

    /// Timestamp rule whose layout is not a valid strftime template
    #[error("sort rule {index} (timestamp): invalid layout '{layout}'")]
    InvalidLayout { index: usize, layout: String },

    /// Timestamp rule naming an unknown IANA time zone
    #[error("sort rule {index} (timestamp): unknown location '{location}'")]
    UnknownLocation { index: usize, location: String },

    /// The extraction regex could not be compiled, so no rule can run
    #[error("sort rule {index} ({sort_type}): extraction regex does not compile: {reason}")]
    InvalidRegex {
        index: usize,
        sort_type: SortType,
        reason: String,
    },

    /// The extracted key could not be parsed as the rule's type
    #[error("sort rule {index} ({sort_type}): cannot parse '{key}' from {}: {reason}", .file.display())]
    KeyParse {
        index: usize,
        sort_type: SortType,
        file: PathBuf,
        key: String,
        reason: String,
    },

    /// The file name did not yield a value for the rule's group
    #[error("sort rule {index} ({sort_type}): no value for group '{group}' in {}", .file.display())]
    MissingKey {
        index: usize,
        sort_type: SortType,
        group: String,
        file: PathBuf,
    },
}

impl RuleError {
    /// Position of the failing rule in `sort_by`
    pub fn rule_index(&self) -> usize {
        match self {
            Self::UnknownGroup { index, .. }
            | Self::MissingLayout { index }
            | Self::InvalidLayout { index, .. }
            | Self::UnknownLocation { index, .. }
            | Self::InvalidRegex { index, .. }
            | Self::KeyParse { index, .. }
            | Self::MissingKey { index, .. } => *index,
        }
    }

    /// Whether the rule was skipped entirely (as opposed to applied with fallbacks)
    pub fn is_configuration(&self) -> bool {
        !matches!(self, Self::KeyParse { .. } | Self::MissingKey { .. })
    }
}

/// Errors collected across all sort rules of one selection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleErrors {
    errors: Vec<RuleError>,
}

impl RuleErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: RuleError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RuleError> {
        self.errors.iter()
    }

    /// `Ok(())` when nothing failed, otherwise the collected errors
    pub fn into_result(self) -> std::result::Result<(), Self> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl Extend<RuleError> for RuleErrors {
    fn extend<I: IntoIterator<Item = RuleError>>(&mut self, iter: I) {
        self.errors.extend(iter);
    }
}

impl IntoIterator for RuleErrors {
    type Item = RuleError;
    type IntoIter = std::vec::IntoIter<RuleError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a RuleErrors {
    type Item = &'a RuleError;
    type IntoIter = std::slice::Iter<'a, RuleError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl fmt::Display for RuleErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for RuleErrors {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_errors_into_ok() {
        assert!(RuleErrors::new().into_result().is_ok());
    }

    #[test]
    fn test_display_joins_errors() {
        let mut errors = RuleErrors::new();
        errors.push(RuleError::MissingLayout { index: 0 });
        errors.push(RuleError::UnknownLocation {
            index: 1,
            location: "Mars/Olympus".to_string(),
        });

        let message = errors.to_string();
        assert_eq!(errors.len(), 2);
        assert!(message.contains("sort rule 0 (timestamp): 'layout' must be specified; "));
        assert!(message.contains("Mars/Olympus"));
    }

    #[test]
    fn test_key_errors_are_not_configuration() {
        let parse = RuleError::KeyParse {
            index: 3,
            sort_type: SortType::Numeric,
            file: PathBuf::from("/var/log/app.log.x"),
            key: "x".to_string(),
            reason: "invalid digit found in string".to_string(),
        };
        assert!(!parse.is_configuration());
        assert_eq!(parse.rule_index(), 3);
        assert!(parse.to_string().contains("/var/log/app.log.x"));

        let unknown = RuleError::UnknownGroup {
            index: 0,
            sort_type: SortType::Alphabetical,
            group: "missing".to_string(),
        };
        assert!(unknown.is_configuration());
    }
}
