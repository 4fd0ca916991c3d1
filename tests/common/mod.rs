// Shared helpers for integration tests.
//
// Provides a temporary-directory-backed source tree and a fluent builder
// so each integration test can set up an isolated environment without
// repeating filesystem boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

/// An isolated source tree backed by a [`tempfile::TempDir`], with a
/// sibling destination directory for link targets.
///
/// Both directories are deleted when the value is dropped.
pub struct TestTree {
    dir: tempfile::TempDir,
}

impl TestTree {
    /// Root of the source tree (pass this to `plan::generate`).
    pub fn root(&self) -> PathBuf {
        self.dir.path().join("src")
    }

    /// Canonicalized source root: plan keys are derived from this.
    pub fn canonical_root(&self) -> PathBuf {
        std::fs::canonicalize(self.root()).expect("canonicalize source root")
    }

    /// Destination directory reserved for link targets.
    pub fn dest(&self) -> PathBuf {
        self.dir.path().join("dst")
    }

    /// Directory containing both the source and destination trees.
    pub fn base(&self) -> &Path {
        self.dir.path()
    }
}

/// Fluent builder for [`TestTree`].
pub struct TreeBuilder {
    tree: TestTree,
}

impl TreeBuilder {
    /// Begin building a tree with empty `src/` and `dst/` directories.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        std::fs::create_dir_all(dir.path().join("src")).expect("create source root");
        std::fs::create_dir_all(dir.path().join("dst")).expect("create dest root");
        Self {
            tree: TestTree { dir },
        }
    }

    /// Destination directory of the tree being built.
    pub fn dest(&self) -> PathBuf {
        self.tree.dest()
    }

    /// Write a leaf file at `rel` (under the source root), creating parent
    /// directories as needed.
    pub fn with_file(self, rel: &str, content: &str) -> Self {
        let path = self.tree.root().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent dirs");
        }
        std::fs::write(&path, content).expect("write leaf file");
        self
    }

    /// Create an empty directory at `rel` under the source root.
    pub fn with_dir(self, rel: &str) -> Self {
        std::fs::create_dir_all(self.tree.root().join(rel)).expect("create directory");
        self
    }

    /// Declare a `.dest-dir` mapping directive in `rel_dir` (`""` for the
    /// source root) whose payload is `dest`.
    pub fn with_dest_dir(self, rel_dir: &str, dest: &Path) -> Self {
        self.with_file(
            &rel_join(rel_dir, ".dest-dir"),
            &format!("{}\n", dest.display()),
        )
    }

    /// Declare a `.mudot-ignore` directive in `rel_dir` (`""` for the
    /// source root) listing `lines`.
    pub fn with_ignore(self, rel_dir: &str, lines: &[&str]) -> Self {
        let mut contents = lines.join("\n");
        contents.push('\n');
        self.with_file(&rel_join(rel_dir, ".mudot-ignore"), &contents)
    }

    /// Finish building and return the configured tree.
    pub fn build(self) -> TestTree {
        self.tree
    }
}

fn rel_join(rel_dir: &str, name: &str) -> String {
    if rel_dir.is_empty() {
        name.to_string()
    } else {
        format!("{rel_dir}/{name}")
    }
}
