//! Plan generation: the depth-first traversal that resolves directives
//! and assigns a destination to every leaf.
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::directives::{
    self, IGNORE_DIRECTIVE_FILE, IgnoreDirective, MAPPING_DIRECTIVE_FILE, MappingDirective,
};
use crate::error::PlanError;
use crate::logging::Logger;
use crate::paths::find_nearest_containing;

/// The finished source → destination mapping for one run.
///
/// Keys are absolute leaf paths under the traversal root, unique by
/// construction; iteration is in sorted source order, so rendering and
/// linking are deterministic. Consumed unchanged by either the renderer
/// or the link executor.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Plan {
    entries: BTreeMap<PathBuf, PathBuf>,
}

impl Plan {
    /// Iterate over `(source, destination)` entries in source order.
    pub fn entries(&self) -> impl Iterator<Item = (&Path, &Path)> {
        self.entries.iter().map(|(s, d)| (s.as_path(), d.as_path()))
    }

    /// Number of planned entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the plan contains no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Destination planned for `source`, if any.
    #[must_use]
    pub fn destination(&self, source: &Path) -> Option<&Path> {
        self.entries.get(source).map(PathBuf::as_path)
    }

    fn insert(&mut self, source: PathBuf, dest: PathBuf) {
        self.entries.insert(source, dest);
    }
}

impl FromIterator<(PathBuf, PathBuf)> for Plan {
    fn from_iter<I: IntoIterator<Item = (PathBuf, PathBuf)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Directives in effect for the node currently being visited.
///
/// An immutable value threaded through the recursive walk: entering a
/// directory produces a *child* scope, so directives can never leak
/// across sibling branches and fall out of effect on backtrack without
/// any explicit pruning. The mapping slot is single-valued (a file has
/// one destination, nearest directive wins); ignore directives stack (a
/// node ignored by any active set is skipped).
#[derive(Debug, Clone, Default)]
struct Scope {
    mapping: Option<MappingDirective>,
    ignores: Vec<IgnoreDirective>,
}

impl Scope {
    fn is_ignored(&self, path: &Path) -> bool {
        self.ignores.iter().any(|directive| directive.contains(path))
    }

    /// Scope for the contents of `dir`: the parent directives plus any
    /// declared by `dir` itself (by direct containment, not ancestor
    /// search).
    fn enter(&self, dir: &Path) -> Result<Self, PlanError> {
        let mut child = self.clone();
        let mapping_file = dir.join(MAPPING_DIRECTIVE_FILE);
        if mapping_file.is_file() {
            child.mapping = Some(MappingDirective::load(&mapping_file)?);
        }
        let ignore_file = dir.join(IGNORE_DIRECTIVE_FILE);
        if ignore_file.is_file() {
            child.ignores.push(IgnoreDirective::load(&ignore_file)?);
        }
        Ok(child)
    }
}

/// Generate the deployment plan for the tree rooted at `source_root`.
///
/// The root is canonicalized first; every node path derives from it, so
/// ignore-set membership is a plain equality check on one absolute
/// spelling per path. The initial scope is seeded from directive files
/// found in the root's ancestor chain, then the walk descends
/// depth-first.
///
/// # Errors
///
/// Returns [`PlanError::Io`] if the tree cannot be read,
/// [`PlanError::MalformedDirective`] for an empty directive file, or
/// [`PlanError::Unmapped`] for a leaf with no destination. The plan is
/// all-or-nothing: any error aborts the whole run.
pub fn generate(source_root: &Path, log: &Logger) -> Result<Plan, PlanError> {
    let root = dunce::canonicalize(source_root).map_err(|source| PlanError::Io {
        path: source_root.to_path_buf(),
        source,
    })?;

    let mut scope = Scope::default();
    if let Some(file) = find_nearest_containing(MAPPING_DIRECTIVE_FILE, &root) {
        log.debug(&format!("inherited mapping directive: {}", file.display()));
        scope.mapping = Some(MappingDirective::load(&file)?);
    }
    if let Some(file) = find_nearest_containing(IGNORE_DIRECTIVE_FILE, &root) {
        log.debug(&format!("inherited ignore directive: {}", file.display()));
        scope.ignores.push(IgnoreDirective::load(&file)?);
    }

    let mut plan = Plan::default();
    visit(&root, &scope, &mut plan, log)?;
    Ok(plan)
}

fn visit(node: &Path, scope: &Scope, plan: &mut Plan, log: &Logger) -> Result<(), PlanError> {
    if scope.is_ignored(node) {
        log.debug(&format!("ignored: {}", node.display()));
        return Ok(());
    }
    if node.is_dir() {
        let scope = scope.enter(node)?;
        for child in sorted_children(node)? {
            visit(&child, &scope, plan, log)?;
        }
        return Ok(());
    }
    visit_leaf(node, scope, plan, log)
}

fn visit_leaf(leaf: &Path, scope: &Scope, plan: &mut Plan, log: &Logger) -> Result<(), PlanError> {
    let line = directives::first_line(leaf)?;
    // Ignore marker wins over a destination marker on the same line.
    if directives::has_inline_ignore(&line) {
        log.debug(&format!("inline ignore: {}", leaf.display()));
        return Ok(());
    }
    let dest = match directives::inline_destination(&line)? {
        Some(dest) => dest,
        None => scope
            .mapping
            .as_ref()
            .and_then(|directive| directive.destination_for(leaf))
            .ok_or_else(|| PlanError::Unmapped(leaf.to_path_buf()))?,
    };
    plan.insert(leaf.to_path_buf(), dest);
    Ok(())
}

/// Children of `dir` in sorted name order.
///
/// Any deterministic order works here: plan membership depends only on
/// ancestor relationships, never on sibling traversal order.
fn sorted_children(dir: &Path) -> Result<Vec<PathBuf>, PlanError> {
    let io_err = |source| PlanError::Io {
        path: dir.to_path_buf(),
        source,
    };
    let mut children = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_err)? {
        children.push(entry.map_err(io_err)?.path());
    }
    children.sort();
    Ok(children)
}
