//! Domain-specific error types for the deployment engine.
//!
//! This module provides a structured error hierarchy using [`thiserror`].
//! Internal modules return typed errors ([`PlanError`], [`LinkError`])
//! while command handlers at the CLI boundary convert them to
//! [`anyhow::Error`] via the standard `?` operator.
//!
//! # Error hierarchy
//!
//! ```text
//! PlanError   — directive parsing and plan generation
//! LinkError   — destination conflicts and symlink creation
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Errors that arise while resolving directives and generating the plan.
///
/// All variants are fatal: the plan is all-or-nothing per run, so the
/// traversal aborts on the first error instead of emitting a partial
/// mapping.
#[derive(Error, Debug)]
pub enum PlanError {
    /// A directive file exists but carries no usable payload.
    #[error("malformed directive file {}: {reason}", .path.display())]
    MalformedDirective {
        /// Path of the offending directive file.
        path: PathBuf,
        /// Human-readable reason (e.g. `"first line is empty"`).
        reason: String,
    },

    /// A leaf has no inline directive and no active mapping directive,
    /// so there is no way to determine a destination for it.
    #[error("{} is not mapped: no inline directive and no active .dest-dir", .0.display())]
    Unmapped(PathBuf),

    /// A `~` prefix was found but the home directory is not known.
    #[error("cannot expand '~' in '{0}': home directory is not known")]
    HomeDirUnavailable(String),

    /// An I/O error occurred while reading the source tree.
    #[error("IO error reading {}: {source}", .path.display())]
    Io {
        /// Path that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// A destination path that already exists and is not the expected symlink.
///
/// Conflicts are collected, not immediately fatal: the check phase records
/// every conflict before the run is refused, so the user sees all of them
/// at once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    /// Source file the destination was planned for.
    pub source: PathBuf,
    /// Destination path that is already occupied.
    pub dest: PathBuf,
    /// What occupies the destination (e.g. `"a file"`, `"symlink to …"`).
    pub found: String,
}

impl std::fmt::Display for Conflict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "destination {} for {} already exists: {}",
            self.dest.display(),
            self.source.display(),
            self.found
        )
    }
}

/// Errors that arise while executing the link phase.
#[derive(Error, Debug)]
pub enum LinkError {
    /// One or more destinations are occupied; nothing was created.
    #[error("{} destination conflict(s); nothing was linked", .0.len())]
    Conflicts(Vec<Conflict>),

    /// Symlink creation was denied by the OS (Windows without Developer
    /// Mode or administrator rights).
    #[error(
        "cannot create symlink at {}: enable Developer Mode or run as Administrator",
        .0.display()
    )]
    PermissionDenied(PathBuf),

    /// An I/O error occurred while checking or creating a link.
    #[error("IO error at {}: {source}", .path.display())]
    Io {
        /// Path being checked or created when the error occurred.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}
