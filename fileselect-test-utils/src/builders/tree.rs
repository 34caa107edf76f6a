//! Temporary directory trees populated with log-like files

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Builder for a temporary directory of files and subdirectories
///
/// Paths are relative to the tree root and use `/` as separator.
#[derive(Default)]
pub struct TestTree {
    files: Vec<String>,
    dirs: Vec<String>,
}

impl TestTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file (parent directories are created)
    pub fn file(mut self, path: &str) -> Self {
        self.files.push(path.to_string());
        self
    }

    /// Add several files
    pub fn files<'a>(mut self, paths: impl IntoIterator<Item = &'a str>) -> Self {
        self.files.extend(paths.into_iter().map(str::to_string));
        self
    }

    /// Add an empty directory
    pub fn dir(mut self, path: &str) -> Self {
        self.dirs.push(path.to_string());
        self
    }

    /// Create the tree on disk
    pub fn build(self) -> BuiltTree {
        let root = TempDir::new().expect("failed to create temp dir");

        for dir in &self.dirs {
            fs::create_dir_all(root.path().join(dir)).expect("failed to create dir");
        }
        for file in &self.files {
            let path = root.path().join(file);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).expect("failed to create parent dir");
            }
            fs::write(&path, file.as_bytes()).expect("failed to write file");
        }

        BuiltTree { root }
    }
}

/// A tree on disk, removed when dropped
pub struct BuiltTree {
    root: TempDir,
}

impl BuiltTree {
    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Absolute path of a tree-relative path
    pub fn join(&self, relative: &str) -> PathBuf {
        self.root.path().join(relative)
    }

    /// Glob pattern anchored at the tree root
    pub fn pattern(&self, glob: &str) -> String {
        format!("{}/{}", self.root.path().display(), glob)
    }

    /// Tree-relative `/`-separated form of `paths`
    pub fn relative(&self, paths: &[PathBuf]) -> Vec<String> {
        paths
            .iter()
            .map(|p| {
                p.strip_prefix(self.root.path())
                    .unwrap_or(p)
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }
}
