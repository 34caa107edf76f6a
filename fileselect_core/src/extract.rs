//! Named-group key extraction from file names

use regex::Regex;
use std::collections::HashMap;
use std::path::Path;

/// Compiled extraction regex applied to file base names
#[derive(Debug, Clone)]
pub struct KeyExtractor {
    regex: Regex,
}

impl KeyExtractor {
    /// Compile the extraction regex
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            regex: Regex::new(pattern)?,
        })
    }

    /// Whether the regex defines a named group called `name`
    pub fn has_group(&self, name: &str) -> bool {
        self.regex.capture_names().flatten().any(|n| n == name)
    }

    /// All named groups that matched in `filename`
    ///
    /// A non-matching name yields an empty map; groups that did not take
    /// part in the match are left out.
    pub fn extract(&self, filename: &str) -> HashMap<String, String> {
        let Some(captures) = self.regex.captures(filename) else {
            return HashMap::new();
        };

        self.regex
            .capture_names()
            .flatten()
            .filter_map(|name| {
                captures
                    .name(name)
                    .map(|m| (name.to_string(), m.as_str().to_string()))
            })
            .collect()
    }

    /// Value of one group in `filename`, if it matched
    pub fn key<'a>(&self, filename: &'a str, group: &str) -> Option<&'a str> {
        self.regex
            .captures(filename)
            .and_then(|captures| captures.name(group))
            .map(|m| m.as_str())
    }

    /// Value of one group in the base name of `path`
    ///
    /// Non UTF-8 names never match.
    pub fn key_for_path<'a>(&self, path: &'a Path, group: &str) -> Option<&'a str> {
        self.key(base_name(path)?, group)
    }
}

/// Last component of `path`, or the whole path when it has none
fn base_name(path: &Path) -> Option<&str> {
    match path.file_name() {
        Some(name) => name.to_str(),
        None => path.to_str(),
    }
}
