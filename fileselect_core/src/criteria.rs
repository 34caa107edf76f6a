//! Matching criteria model
//!
//! These types mirror the configuration shape consumed by the selector:
//!
//! ```toml
//! include = ["/var/log/app/*.log*"]
//! exclude = ["/var/log/app/*.gz"]
//!
//! [ordering_criteria]
//! regex = '^app\.log\.(?P<rotation>\d+)$'
//!
//! [[ordering_criteria.sort_by]]
//! sort_type = "numeric"
//! regex_key = "rotation"
//! ```
//!
//! They are plain data: decoding never fails on semantic problems. Call
//! [`MatchingCriteria::validate`] (or build a [`Selector`](crate::Selector))
//! to reject criteria that cannot work.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;
use crate::extract::KeyExtractor;
use crate::matcher::{ExpansionError, GlobMatcher};
use crate::sort_rule::SortRule;

/// Include/exclude patterns plus optional ordering
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchingCriteria {
    /// Glob patterns to expand, in priority order
    #[serde(default)]
    pub include: Vec<String>,
    /// Glob patterns whose matches are dropped
    #[serde(default)]
    pub exclude: Vec<String>,
    /// Rules reducing the matches to a single file
    #[serde(default)]
    pub ordering_criteria: OrderingCriteria,
}

/// Extraction regex and the sort rules applied to its named groups
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderingCriteria {
    #[serde(default)]
    pub regex: String,
    /// Applied in listed order; the last rule ends up as the primary key
    #[serde(default)]
    pub sort_by: Vec<SortRuleConfig>,
}

/// Kind of comparison a sort rule performs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortType {
    Numeric,
    Alphabetical,
    Timestamp,
}

impl fmt::Display for SortType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Numeric => "numeric",
            Self::Alphabetical => "alphabetical",
            Self::Timestamp => "timestamp",
        })
    }
}

/// A sort rule as written in configuration, before validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortRuleConfig {
    pub sort_type: SortType,
    pub regex_key: String,
    #[serde(default)]
    pub ascending: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl SortRuleConfig {
    pub fn numeric(regex_key: &str) -> Self {
        Self::new(SortType::Numeric, regex_key)
    }

    pub fn alphabetical(regex_key: &str) -> Self {
        Self::new(SortType::Alphabetical, regex_key)
    }

    pub fn timestamp(regex_key: &str, layout: &str) -> Self {
        Self {
            layout: Some(layout.to_string()),
            ..Self::new(SortType::Timestamp, regex_key)
        }
    }

    fn new(sort_type: SortType, regex_key: &str) -> Self {
        Self {
            sort_type,
            regex_key: regex_key.to_string(),
            ascending: false,
            layout: None,
            location: None,
        }
    }

    /// Set the sort direction
    pub fn with_ascending(mut self, ascending: bool) -> Self {
        self.ascending = ascending;
        self
    }

    /// Set the IANA time zone used to interpret timestamps
    pub fn with_location(mut self, location: &str) -> Self {
        self.location = Some(location.to_string());
        self
    }
}

impl MatchingCriteria {
    /// Create criteria from include patterns
    pub fn new<I, S>(include: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            include: include.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Replace the exclude patterns
    pub fn with_exclude<I, S>(mut self, exclude: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude = exclude.into_iter().map(Into::into).collect();
        self
    }

    /// Set the ordering criteria
    pub fn with_ordering(mut self, regex: &str, sort_by: Vec<SortRuleConfig>) -> Self {
        self.ordering_criteria = OrderingCriteria {
            regex: regex.to_string(),
            sort_by,
        };
        self
    }

    /// Whether a selection reduces the matches to a single file
    pub fn is_ordered(&self) -> bool {
        !self.ordering_criteria.sort_by.is_empty()
    }

    /// Check the criteria the way a collector does when loading configuration
    ///
    /// Selection itself tolerates every problem reported here (bad globs
    /// match nothing, bad rules are skipped); validating first turns those
    /// silent degradations into a startup error.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.include.is_empty() {
            return Err(ValidationError::NoIncludePatterns);
        }

        for patterns in [&self.include, &self.exclude] {
            GlobMatcher::new(patterns).map_err(|e| match e {
                ExpansionError::InvalidPattern { pattern, source } => {
                    ValidationError::invalid_glob(&pattern, source)
                }
            })?;
        }

        self.ordering_criteria.validate()
    }
}

impl OrderingCriteria {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.sort_by.is_empty() {
            return Ok(());
        }

        if self.regex.is_empty() {
            return Err(ValidationError::MissingRegex);
        }

        let extractor = KeyExtractor::new(&self.regex).map_err(ValidationError::invalid_regex)?;

        for (index, rule) in self.sort_by.iter().enumerate() {
            SortRule::from_config(index, rule, &extractor)?;
        }

        Ok(())
    }
}
