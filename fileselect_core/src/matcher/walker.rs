//! Filesystem expansion of a single glob pattern
//!
//! The pattern is split into a literal base directory and a glob remainder.
//! Only the base is walked, and only as deep as the remainder can reach
//! unless it contains `**`. Within each directory files are visited before
//! subdirectories, each group in file-name order, so shallower matches come
//! first and expansion is deterministic for an unchanged directory tree.

use globset::GlobMatcher as CompiledGlob;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{ExpansionError, Result, compile_glob};

/// Characters that make a path segment a glob rather than a literal name
const GLOB_META: &[char] = &['*', '?', '[', ']', '{', '}', '\\'];

/// Streaming expansion of one include pattern into regular files
pub struct GlobExpansion {
    walker: walkdir::IntoIter,
    glob: CompiledGlob,
    /// Relative patterns are walked from `.`; this prefix is stripped again
    strip_dot: bool,
}

impl GlobExpansion {
    /// Prepare the expansion of `pattern`
    pub fn new(pattern: &str) -> Result<Self> {
        let glob = compile_glob(pattern)
            .map_err(|source| ExpansionError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })?
            .compile_matcher();

        let split = SplitPattern::parse(pattern);
        let strip_dot = split.base.as_os_str().is_empty();
        let root = if strip_dot {
            PathBuf::from(".")
        } else {
            split.base
        };

        let mut walker = WalkDir::new(&root).follow_links(true).sort_by(|a, b| {
            a.file_type()
                .is_dir()
                .cmp(&b.file_type().is_dir())
                .then_with(|| a.file_name().cmp(b.file_name()))
        });
        if let Some(depth) = split.max_depth {
            walker = walker.max_depth(depth);
        }

        log::trace!(
            "Expanding '{pattern}' from {} (max depth {:?})",
            root.display(),
            split.max_depth
        );

        Ok(Self {
            walker: walker.into_iter(),
            glob,
            strip_dot,
        })
    }

    fn candidate_path<'a>(&self, path: &'a Path) -> &'a Path {
        if self.strip_dot {
            path.strip_prefix(".").unwrap_or(path)
        } else {
            path
        }
    }
}

impl Iterator for GlobExpansion {
    type Item = PathBuf;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.walker.next()? {
                Ok(entry) => {
                    // follow_links(true) makes this the type of the link target
                    if !entry.file_type().is_file() {
                        continue;
                    }

                    let path = self.candidate_path(entry.path());
                    if self.glob.is_match(path) {
                        return Some(path.to_path_buf());
                    }
                }
                Err(e) => {
                    log::debug!("Walk error: {e}");
                    continue;
                }
            }
        }
    }
}

/// A pattern split into its literal base and the depth of its glob part
#[derive(Debug, PartialEq, Eq)]
struct SplitPattern {
    base: PathBuf,
    /// `None` when the glob part contains `**`
    max_depth: Option<usize>,
}

impl SplitPattern {
    fn parse(pattern: &str) -> Self {
        let segments: Vec<&str> = pattern.split('/').collect();
        let literal = segments
            .iter()
            .take_while(|segment| !segment.contains(GLOB_META))
            .count();

        if literal == segments.len() {
            return Self {
                base: PathBuf::from(pattern),
                max_depth: Some(0),
            };
        }

        let base = if literal == 1 && segments[0].is_empty() {
            PathBuf::from("/")
        } else {
            PathBuf::from(segments[..literal].join("/"))
        };

        let rest = &segments[literal..];
        let max_depth = if rest.iter().any(|segment| segment.contains("**")) {
            None
        } else {
            Some(rest.iter().filter(|segment| !segment.is_empty()).count())
        };

        Self { base, max_depth }
    }
}
