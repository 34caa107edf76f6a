//! Glob set matching for exclude patterns

use globset::{GlobSet, GlobSetBuilder};
use std::path::Path;

use super::{ExpansionError, Result, compile_glob};

/// Matches a path against any of a set of glob patterns
#[derive(Debug, Clone)]
pub struct GlobMatcher {
    globset: GlobSet,
    patterns: Vec<String>,
}

impl GlobMatcher {
    /// Create a matcher, failing on the first invalid pattern
    pub fn new(patterns: &[String]) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();

        for pattern in patterns {
            let glob = compile_glob(pattern).map_err(|source| ExpansionError::InvalidPattern {
                pattern: pattern.clone(),
                source,
            })?;
            builder.add(glob);
        }

        Self::finish(builder, patterns.to_vec())
    }

    /// Create a matcher that ignores invalid patterns
    ///
    /// An invalid exclude pattern excludes nothing.
    pub fn lenient(patterns: &[String]) -> Self {
        let mut builder = GlobSetBuilder::new();
        let mut kept = Vec::with_capacity(patterns.len());

        for pattern in patterns {
            match compile_glob(pattern) {
                Ok(glob) => {
                    builder.add(glob);
                    kept.push(pattern.clone());
                }
                Err(e) => log::warn!("Ignoring exclude pattern '{pattern}': {e}"),
            }
        }

        Self::finish(builder, kept).unwrap_or_else(|e| {
            log::warn!("Ignoring exclude patterns: {e}");
            Self::empty()
        })
    }

    fn finish(builder: GlobSetBuilder, patterns: Vec<String>) -> Result<Self> {
        let globset = builder
            .build()
            .map_err(|source| ExpansionError::InvalidPattern {
                pattern: patterns.join(", "),
                source,
            })?;

        Ok(Self { globset, patterns })
    }

    fn empty() -> Self {
        Self {
            globset: GlobSet::empty(),
            patterns: Vec::new(),
        }
    }

    /// Check if a path matches any of the patterns
    pub fn matches(&self, path: &Path) -> bool {
        !self.patterns.is_empty() && self.globset.is_match(path)
    }
}
