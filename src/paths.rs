//! Path helpers: home-directory expansion and nearest-ancestor lookup.
use std::path::{Path, PathBuf};

use crate::error::PlanError;

/// Expand a leading `~` or `~/` in `raw` to the user's home directory.
///
/// Any other string (including `~user` forms) passes through untouched.
///
/// # Errors
///
/// Returns [`PlanError::HomeDirUnavailable`] if a `~` prefix is present
/// but no home directory can be determined.
pub fn expand_tilde(raw: &str) -> Result<PathBuf, PlanError> {
    if raw == "~" {
        return dirs::home_dir().ok_or_else(|| PlanError::HomeDirUnavailable(raw.to_string()));
    }
    if let Some(rest) = raw.strip_prefix("~/") {
        let home =
            dirs::home_dir().ok_or_else(|| PlanError::HomeDirUnavailable(raw.to_string()))?;
        return Ok(home.join(rest));
    }
    Ok(PathBuf::from(raw))
}

/// Find the nearest ancestor of `start` that directly contains a file
/// named `marker`, returning the path of that file.
///
/// `start` itself is excluded: this lookup seeds directives that apply to
/// the traversal root *from outside* the traversal subtree. Ancestors are
/// searched from nearest to farthest; `None` means the filesystem root
/// was reached without a match.
#[must_use]
pub fn find_nearest_containing(marker: &str, start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .skip(1)
        .map(|dir| dir.join(marker))
        .find(|candidate| candidate.is_file())
}
