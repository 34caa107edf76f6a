//! Candidate discovery from include/exclude glob patterns
//!
//! Include patterns are expanded against the filesystem one after another;
//! matches are kept in first-seen order, exclusions and duplicates are
//! dropped and only regular files are returned.
//!
//! Expansion never fails the whole call. A pattern that does not compile,
//! a base directory that does not exist or an unreadable subdirectory only
//! cost the matches they would have produced. Glob syntax is expected to be
//! checked when configuration is loaded (see
//! [`MatchingCriteria::validate`](crate::MatchingCriteria::validate)).

mod filter;
mod walker;

pub use filter::GlobMatcher;
pub use walker::GlobExpansion;

use globset::{Glob, GlobBuilder};
use std::collections::HashSet;
use std::path::PathBuf;

/// Error raised while preparing a pattern for expansion
#[derive(Debug, thiserror::Error)]
pub enum ExpansionError {
    #[error("Invalid glob pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },
}

/// Result type for pattern expansion
pub type Result<T> = std::result::Result<T, ExpansionError>;

/// Compile a glob with path semantics
///
/// `*`, `?` and classes stay within one path segment, `**` crosses
/// directories and `{a,b}` alternates.
pub fn compile_glob(pattern: &str) -> std::result::Result<Glob, globset::Error> {
    GlobBuilder::new(pattern).literal_separator(true).build()
}

/// Expand `include`, drop anything matching `exclude`, deduplicate
pub fn find_candidates(include: &[String], exclude: &[String]) -> Vec<PathBuf> {
    let excludes = GlobMatcher::lenient(exclude);
    let mut seen = HashSet::new();
    let mut candidates = Vec::new();

    for pattern in include {
        let expansion = match GlobExpansion::new(pattern) {
            Ok(expansion) => expansion,
            Err(e) => {
                log::warn!("Skipping include pattern: {e}");
                continue;
            }
        };

        let mut matched = 0usize;
        for path in expansion {
            if excludes.matches(&path) {
                log::trace!("Excluded {}", path.display());
                continue;
            }
            if seen.insert(path.clone()) {
                matched += 1;
                candidates.push(path);
            }
        }
        log::debug!("Pattern '{pattern}' contributed {matched} new file(s)");
    }

    candidates
}
