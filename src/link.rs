//! Link execution: two-phase, all-or-nothing creation of the planned
//! symlinks.
//!
//! Phase 1 classifies every destination without touching the filesystem;
//! phase 2 runs only when phase 1 found no conflicts. A single occupied
//! destination therefore refuses the whole run, so no partial deployment
//! can ever be left behind.
use std::path::{Path, PathBuf};

use crate::error::{Conflict, LinkError};
use crate::logging::Logger;
use crate::plan::Plan;

/// Outcome summary of a successful link run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkReport {
    /// Symlinks created by this run.
    pub created: u32,
    /// Destinations that already pointed at the right source.
    pub already_ok: u32,
}

/// State of one destination path, classified during the check phase.
#[derive(Debug)]
enum DestState {
    /// Nothing exists at the destination.
    Vacant,
    /// A symlink to the canonical source is already in place.
    Correct,
    /// Something else occupies the destination.
    Occupied(String),
}

fn classify(dest: &Path, canonical_source: &Path) -> DestState {
    // symlink_metadata, not exists(): a broken symlink still occupies the
    // destination.
    if dest.symlink_metadata().is_err() {
        return DestState::Vacant;
    }
    match std::fs::read_link(dest) {
        Ok(existing) if paths_equal(&existing, canonical_source) => DestState::Correct,
        Ok(existing) => DestState::Occupied(format!("symlink to {}", existing.display())),
        Err(_) => DestState::Occupied(if dest.is_dir() {
            "a directory".to_string()
        } else {
            "a file".to_string()
        }),
    }
}

/// Execute the plan: check every destination, then create all links.
///
/// Destinations already linked to their canonical source count as
/// satisfied and are left untouched, so repeated runs are no-ops.
///
/// # Errors
///
/// Returns [`LinkError::Conflicts`] carrying *every* occupied destination
/// found during the check phase (in which case nothing was created), or
/// [`LinkError::Io`] if a source cannot be resolved or a link cannot be
/// created.
pub fn execute(plan: &Plan, log: &Logger) -> Result<LinkReport, LinkError> {
    // Check phase: resolve sources, classify destinations. No mutation.
    let mut pending: Vec<(PathBuf, &Path)> = Vec::new();
    let mut conflicts = Vec::new();
    let mut already_ok = 0u32;

    for (source, dest) in plan.entries() {
        let canonical = dunce::canonicalize(source).map_err(|err| LinkError::Io {
            path: source.to_path_buf(),
            source: err,
        })?;
        match classify(dest, &canonical) {
            DestState::Vacant => pending.push((canonical, dest)),
            DestState::Correct => already_ok += 1,
            DestState::Occupied(found) => conflicts.push(Conflict {
                source: source.to_path_buf(),
                dest: dest.to_path_buf(),
                found,
            }),
        }
    }

    if !conflicts.is_empty() {
        for conflict in &conflicts {
            log.error(&conflict.to_string());
        }
        return Err(LinkError::Conflicts(conflicts));
    }

    // Apply phase: every destination is clear.
    let mut created = 0u32;
    for (canonical, dest) in pending {
        ensure_parent_dir(dest)?;
        create_symlink(&canonical, dest)?;
        log.debug(&format!("linked {} -> {}", dest.display(), canonical.display()));
        created += 1;
    }

    Ok(LinkReport {
        created,
        already_ok,
    })
}

/// Compare two paths, normalising the `\\?\` prefix that Windows
/// `read_link` prepends to extended-length paths.
fn paths_equal(a: &Path, b: &Path) -> bool {
    strip_win_prefix(a) == strip_win_prefix(b)
}

fn strip_win_prefix(p: &Path) -> PathBuf {
    let s = p.to_string_lossy();
    s.strip_prefix(r"\\?\")
        .map_or_else(|| p.to_path_buf(), PathBuf::from)
}

/// Ensure the parent directory of `path` exists, creating it (and any
/// ancestors) if necessary.
fn ensure_parent_dir(path: &Path) -> Result<(), LinkError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| LinkError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}

/// Create a symlink at `link` pointing to `target` (platform-specific).
fn create_symlink(target: &Path, link: &Path) -> Result<(), LinkError> {
    #[cfg(unix)]
    let result = std::os::unix::fs::symlink(target, link);

    #[cfg(windows)]
    let result = if target.is_dir() {
        std::os::windows::fs::symlink_dir(target, link)
    } else {
        std::os::windows::fs::symlink_file(target, link)
    };

    match result {
        Ok(()) => Ok(()),
        #[cfg(windows)]
        Err(e) if e.raw_os_error() == Some(5) => {
            Err(LinkError::PermissionDenied(link.to_path_buf()))
        }
        Err(source) => Err(LinkError::Io {
            path: link.to_path_buf(),
            source,
        }),
    }
}
