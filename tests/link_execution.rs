#![cfg(unix)]
#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
//! Integration tests for the link executor.
//!
//! These tests exercise the two-phase protocol end-to-end: conflict-free
//! application, idempotent re-runs, and the all-or-nothing guarantee when
//! any destination is already occupied.

mod common;

use common::TreeBuilder;
use mudot::error::LinkError;
use mudot::link;
use mudot::logging::Logger;
use mudot::plan;

fn logger() -> Logger {
    Logger::init(false)
}

#[test]
fn applies_the_whole_plan_with_missing_parents() {
    let builder = TreeBuilder::new();
    let dst = builder.dest();
    let tree = builder
        .with_dest_dir("", &dst)
        .with_file("bashrc", "alias ll='ls -l'\n")
        .with_file("config/git/config", "[user]\n")
        .build();

    let plan = plan::generate(&tree.root(), &logger()).unwrap();
    let report = link::execute(&plan, &logger()).unwrap();

    assert_eq!(report.created, plan.len() as u32);
    let link_path = dst.join("config/git/config");
    assert_eq!(
        std::fs::read_link(&link_path).unwrap(),
        std::fs::canonicalize(tree.root().join("config/git/config")).unwrap()
    );
    // The symlink resolves to the real content.
    assert_eq!(std::fs::read_to_string(&link_path).unwrap(), "[user]\n");
}

#[test]
fn second_run_is_a_no_op() {
    let builder = TreeBuilder::new();
    let dst = builder.dest();
    let tree = builder
        .with_dest_dir("", &dst)
        .with_file("bashrc", "x\n")
        .with_file("profile", "x\n")
        .build();

    let plan = plan::generate(&tree.root(), &logger()).unwrap();
    let first = link::execute(&plan, &logger()).unwrap();
    let second = link::execute(&plan, &logger()).unwrap();

    assert_eq!(second.created, 0);
    assert_eq!(second.already_ok, first.created);
}

#[test]
fn preexisting_correct_symlink_is_not_a_conflict() {
    let builder = TreeBuilder::new();
    let dst = builder.dest();
    let tree = builder
        .with_dest_dir("", &dst)
        .with_file("bashrc", "x\n")
        .build();

    let plan = plan::generate(&tree.root(), &logger()).unwrap();
    // Link one destination by hand, exactly as the executor would.
    std::os::unix::fs::symlink(
        std::fs::canonicalize(tree.root().join("bashrc")).unwrap(),
        dst.join("bashrc"),
    )
    .unwrap();

    let report = link::execute(&plan, &logger()).unwrap();
    assert!(report.already_ok >= 1);
}

#[test]
fn one_occupied_destination_prevents_every_link() {
    let builder = TreeBuilder::new();
    let dst = builder.dest();
    let tree = builder
        .with_dest_dir("", &dst)
        .with_file("good", "x\n")
        .with_file("taken", "x\n")
        .build();
    // Occupy one destination with an unrelated regular file.
    std::fs::write(dst.join("taken"), "already here").unwrap();

    let plan = plan::generate(&tree.root(), &logger()).unwrap();
    let err = link::execute(&plan, &logger()).unwrap_err();

    let LinkError::Conflicts(conflicts) = err else {
        panic!("expected Conflicts, got a different error");
    };
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts.first().unwrap().dest, dst.join("taken"));
    // The valid destination must not have been created.
    assert!(dst.join("good").symlink_metadata().is_err());
    // The occupied destination is untouched.
    assert_eq!(
        std::fs::read_to_string(dst.join("taken")).unwrap(),
        "already here"
    );
}

#[test]
fn all_conflicts_are_reported_together() {
    let builder = TreeBuilder::new();
    let dst = builder.dest();
    let tree = builder
        .with_dest_dir("", &dst)
        .with_file("one", "x\n")
        .with_file("two", "x\n")
        .with_file("free", "x\n")
        .build();
    std::fs::write(dst.join("one"), "occupied").unwrap();
    std::os::unix::fs::symlink("/nonexistent/target", dst.join("two")).unwrap();

    let plan = plan::generate(&tree.root(), &logger()).unwrap();
    let err = link::execute(&plan, &logger()).unwrap_err();

    let LinkError::Conflicts(conflicts) = err else {
        panic!("expected Conflicts, got a different error");
    };
    assert_eq!(conflicts.len(), 2);
}

#[test]
fn wrong_symlink_target_is_a_conflict() {
    let builder = TreeBuilder::new();
    let dst = builder.dest();
    let tree = builder
        .with_dest_dir("", &dst)
        .with_file("bashrc", "x\n")
        .with_file("decoy", "y\n")
        .build();
    // A symlink pointing at a different file is not "already satisfied".
    std::os::unix::fs::symlink(
        std::fs::canonicalize(tree.root().join("decoy")).unwrap(),
        dst.join("bashrc"),
    )
    .unwrap();

    let plan = plan::generate(&tree.root(), &logger()).unwrap();
    let err = link::execute(&plan, &logger()).unwrap_err();
    assert!(matches!(err, LinkError::Conflicts(_)));
}
