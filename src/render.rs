//! Plan preview: reconstructs a display tree from plan keys and renders
//! it with box-drawing connectors.
//!
//! The display tree is a separate structure built only from the plan, so
//! the preview reflects exactly what would be (or was) linked, never the
//! wider source filesystem.
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::{Component, Path, PathBuf};

use crate::plan::Plan;

/// A node in the display tree, keyed by path component.
///
/// Built once from the plan's keys and never mutated after construction.
#[derive(Debug)]
enum Node {
    /// A mapped leaf, annotated with its destination.
    Leaf(PathBuf),
    /// A directory level. `destination` is set when the directory's own
    /// path is a plan key, in which case its children are elided behind
    /// a placeholder when rendering.
    Dir {
        destination: Option<PathBuf>,
        children: BTreeMap<String, Node>,
    },
}

fn component_names(path: &Path) -> Vec<String> {
    path.components()
        .filter_map(|component| match component {
            Component::RootDir => Some("/".to_string()),
            Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
            Component::Prefix(prefix) => Some(prefix.as_os_str().to_string_lossy().into_owned()),
            Component::CurDir | Component::ParentDir => None,
        })
        .collect()
}

fn build_tree(plan: &Plan) -> BTreeMap<String, Node> {
    let mut roots = BTreeMap::new();
    for (source, dest) in plan.entries() {
        insert(&mut roots, &component_names(source), dest);
    }
    roots
}

fn insert(children: &mut BTreeMap<String, Node>, names: &[String], dest: &Path) {
    let Some((head, rest)) = names.split_first() else {
        return;
    };
    if rest.is_empty() {
        match children.get_mut(head) {
            // The path is both a mapped entry and a directory with deeper
            // entries: annotate the directory node instead.
            Some(Node::Dir { destination, .. }) => *destination = Some(dest.to_path_buf()),
            _ => {
                children.insert(head.clone(), Node::Leaf(dest.to_path_buf()));
            }
        }
        return;
    }
    let node = children.entry(head.clone()).or_insert_with(|| Node::Dir {
        destination: None,
        children: BTreeMap::new(),
    });
    // A previously-inserted leaf with deeper entries beneath it becomes an
    // annotated directory.
    if let Node::Leaf(existing) = node {
        *node = Node::Dir {
            destination: Some(existing.clone()),
            children: BTreeMap::new(),
        };
    }
    if let Node::Dir { children: sub, .. } = node {
        insert(sub, rest, dest);
    }
}

/// Render the plan as a tree with box-drawing connectors.
///
/// Depth-first, pre-order; files are listed before subdirectories at each
/// level, both in name order. The last sibling at a level uses `└──`,
/// others `├──`; the very first line of the output uses `┌──`, collapsed
/// to no glyph when the top level has exactly one entry. Mapped entries
/// are annotated `name --> destination`; a directory that is itself a
/// plan key shows a single `…` placeholder instead of its children.
#[must_use]
pub fn render(plan: &Plan) -> String {
    let mut out = String::new();
    render_level(&build_tree(plan), &[], true, &mut out);
    out
}

fn head_for(columns: &[bool]) -> String {
    columns
        .iter()
        .map(|more| if *more { "│   " } else { "    " })
        .collect()
}

fn render_level(children: &BTreeMap<String, Node>, columns: &[bool], first: bool, out: &mut String) {
    let (dirs, files): (Vec<_>, Vec<_>) = children
        .iter()
        .partition(|(_, node)| matches!(node, Node::Dir { .. }));
    let ordered: Vec<_> = files.into_iter().chain(dirs).collect();

    let head = head_for(columns);
    let last = ordered.len().saturating_sub(1);
    for (i, (name, node)) in ordered.iter().enumerate() {
        let only_child = first && ordered.len() == 1;
        let glyph = if only_child {
            ""
        } else if first && i == 0 {
            "┌──"
        } else if i == last {
            "└──"
        } else {
            "├──"
        };
        let mut child_columns = columns.to_vec();
        if !only_child {
            child_columns.push(i != last);
        }
        match node {
            Node::Leaf(dest) => {
                let _ = writeln!(out, "{head}{glyph}{name} --> {}", dest.display());
            }
            Node::Dir {
                destination: Some(dest),
                ..
            } => {
                // Contents are implied by the directory-level mapping.
                let _ = writeln!(out, "{head}{glyph}{name} --> {}", dest.display());
                let _ = writeln!(out, "{}└──…", head_for(&child_columns));
            }
            Node::Dir {
                destination: None,
                children: sub,
            } => {
                let _ = writeln!(out, "{head}{glyph}{name}");
                render_level(sub, &child_columns, false, out);
            }
        }
    }
}
