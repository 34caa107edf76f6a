//! Top-level selection: discovery followed by ordering

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::criteria::MatchingCriteria;
use crate::error::{Result, RuleErrors};
use crate::matcher::find_candidates;
use crate::ordering::order;

/// Outcome of one selection
///
/// `paths` is always usable: rule failures only make the order less
/// informed and are reported in `errors`. Whether they matter is up to the
/// caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub paths: Vec<PathBuf>,
    pub errors: RuleErrors,
}

impl Selection {
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self {
            paths,
            errors: RuleErrors::new(),
        }
    }

    pub fn with_errors(paths: Vec<PathBuf>, errors: RuleErrors) -> Self {
        Self { paths, errors }
    }

    /// No rule reported a problem
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// The selected file when ordering is configured, the first match otherwise
    pub fn first(&self) -> Option<&Path> {
        self.paths.first().map(PathBuf::as_path)
    }

    /// Paths plus error messages, for machine-readable output
    pub fn report(&self) -> SelectionReport {
        SelectionReport {
            paths: self.paths.clone(),
            errors: self.errors.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Serializable view of a [`Selection`]
#[derive(Debug, Clone, Serialize)]
pub struct SelectionReport {
    pub paths: Vec<PathBuf>,
    pub errors: Vec<String>,
}

/// Find the files matching `criteria` and order them
///
/// Performs a fresh scan every call. Never fails: see the matcher and
/// ordering modules for how each problem degrades.
pub fn find_files(criteria: &MatchingCriteria) -> Selection {
    let candidates = find_candidates(&criteria.include, &criteria.exclude);
    log::debug!(
        "Found {} candidate(s) for {} include pattern(s)",
        candidates.len(),
        criteria.include.len()
    );

    let selection = order(candidates, &criteria.ordering_criteria);
    if !selection.is_clean() {
        log::debug!("Selection carries {} rule error(s)", selection.errors.len());
    }
    selection
}

/// Validated criteria ready for repeated selection
#[derive(Debug, Clone)]
pub struct Selector {
    criteria: MatchingCriteria,
}

impl Selector {
    /// Validate `criteria` and build a selector
    pub fn new(criteria: MatchingCriteria) -> Result<Self> {
        criteria.validate()?;
        Ok(Self { criteria })
    }

    pub fn criteria(&self) -> &MatchingCriteria {
        &self.criteria
    }

    /// Scan the filesystem and select
    pub fn select(&self) -> Selection {
        find_files(&self.criteria)
    }
}
