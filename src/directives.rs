//! Directive parsing: directory-level directive files and inline
//! first-line markers.
//!
//! Two directive files scope behaviour to a directory and its
//! descendants: [`MAPPING_DIRECTIVE_FILE`] declares a destination root,
//! [`IGNORE_DIRECTIVE_FILE`] declares paths to exclude. Two inline
//! markers override behaviour for a single leaf: `~--X` skips the file,
//! `~--> '<path>'` pins its destination.
use std::collections::HashSet;
use std::io::BufRead as _;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::error::PlanError;
use crate::paths::expand_tilde;

/// File declaring a destination root for the directory that contains it.
pub const MAPPING_DIRECTIVE_FILE: &str = ".dest-dir";

/// File declaring paths to exclude from the plan.
pub const IGNORE_DIRECTIVE_FILE: &str = ".mudot-ignore";

static INLINE_IGNORE: LazyLock<Regex> = LazyLock::new(|| compile("~--X"));

// The quoted path may contain backslash-escaped single quotes.
static INLINE_DEST: LazyLock<Regex> =
    LazyLock::new(|| compile(r"~-->\s*'(?P<path>(?:\\'|[^'])*)'"));

/// Compile a pattern known to be valid at authoring time.
fn compile(pattern: &str) -> Regex {
    #[allow(clippy::expect_used)]
    let re = Regex::new(pattern).expect("static regex pattern");
    re
}

/// Whether a first line carries the inline ignore marker (`~--X`).
///
/// Checked before the destination marker: a line carrying both is
/// skipped, not mapped.
#[must_use]
pub fn has_inline_ignore(first_line: &str) -> bool {
    INLINE_IGNORE.is_match(first_line)
}

/// Parse an inline destination marker (`~--> '<path>'`) from a first line.
///
/// The captured text is used verbatim (no unescaping) and home-expanded.
///
/// # Errors
///
/// Returns [`PlanError::HomeDirUnavailable`] if the captured path starts
/// with `~` and no home directory can be determined.
pub fn inline_destination(first_line: &str) -> Result<Option<PathBuf>, PlanError> {
    match INLINE_DEST
        .captures(first_line)
        .and_then(|caps| caps.name("path"))
    {
        Some(m) => Ok(Some(expand_tilde(m.as_str())?)),
        None => Ok(None),
    }
}

/// Read the first line of `path` as text.
///
/// Reads bytes up to the first newline and decodes them lossily, so a
/// binary leaf cannot abort the run with an encoding error.
///
/// # Errors
///
/// Returns [`PlanError::Io`] if the file cannot be opened or read.
pub fn first_line(path: &Path) -> Result<String, PlanError> {
    let file = std::fs::File::open(path).map_err(|source| PlanError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = std::io::BufReader::new(file);
    let mut buf = Vec::new();
    reader
        .read_until(b'\n', &mut buf)
        .map_err(|source| PlanError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

fn parent_dir(file: &Path) -> PathBuf {
    file.parent().map_or_else(|| PathBuf::from("/"), Path::to_path_buf)
}

/// Directory-scoped declaration of a default destination root.
///
/// Scope: the declaring directory and all its descendants, until shadowed
/// by a nearer mapping directive deeper in the same branch. At most one
/// mapping directive is active for any node (nearest wins).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingDirective {
    /// Directory containing the `.dest-dir` file.
    pub declaring_dir: PathBuf,
    /// Home-expanded destination root for leaves without an inline directive.
    pub destination_root: PathBuf,
}

impl MappingDirective {
    /// Load a mapping directive from a `.dest-dir` file.
    ///
    /// The payload is the first line, stripped of surrounding whitespace
    /// and home-expanded.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::MalformedDirective`] if the first line is
    /// empty, or [`PlanError::Io`] if the file cannot be read.
    pub fn load(file: &Path) -> Result<Self, PlanError> {
        let line = first_line(file)?;
        let line = line.trim();
        if line.is_empty() {
            return Err(PlanError::MalformedDirective {
                path: file.to_path_buf(),
                reason: "first line is empty".to_string(),
            });
        }
        Ok(Self {
            declaring_dir: parent_dir(file),
            destination_root: expand_tilde(line)?,
        })
    }

    /// Destination for `leaf` under this directive:
    /// `destination_root / leaf.relative_to(declaring_dir)`.
    ///
    /// Returns `None` if `leaf` is not under the declaring directory
    /// (which cannot happen for a correctly scoped traversal).
    #[must_use]
    pub fn destination_for(&self, leaf: &Path) -> Option<PathBuf> {
        leaf.strip_prefix(&self.declaring_dir)
            .ok()
            .map(|rel| self.destination_root.join(rel))
    }
}

/// Directory-scoped set of paths excluded from the plan.
///
/// Multiple ignore directives stack: a node is ignored if it appears in
/// any active set. The directive file always excludes itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoreDirective {
    ignored: HashSet<PathBuf>,
}

impl IgnoreDirective {
    /// Load an ignore directive from a `.mudot-ignore` file.
    ///
    /// Each non-blank line, trimmed, is a path relative to the declaring
    /// directory. Blank lines are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::Io`] if the file cannot be read.
    pub fn load(file: &Path) -> Result<Self, PlanError> {
        let contents = std::fs::read_to_string(file).map_err(|source| PlanError::Io {
            path: file.to_path_buf(),
            source,
        })?;
        let declaring_dir = parent_dir(file);
        let mut ignored: HashSet<PathBuf> = contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| declaring_dir.join(line))
            .collect();
        ignored.insert(file.to_path_buf());
        Ok(Self { ignored })
    }

    /// Whether `path` is excluded by this directive.
    #[must_use]
    pub fn contains(&self, path: &Path) -> bool {
        self.ignored.contains(path)
    }
}
