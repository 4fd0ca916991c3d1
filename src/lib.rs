//! Micro dotfile deployment engine.
//!
//! Computes a deployment plan for a tree of source files onto symlink
//! destinations, previews the plan as a rendered tree, and optionally
//! materializes it. A file's destination comes from a directive embedded
//! in its first line, or is inherited from the nearest enclosing
//! `.dest-dir` directory directive; `.mudot-ignore` files exclude paths
//! from the plan.
//!
//! The crate is organised into thin layers:
//!
//! - **[`directives`]** — directive files and inline first-line markers
//! - **[`plan`]** — the depth-first traversal that assigns destinations
//! - **[`link`]** — two-phase, all-or-nothing symlink creation
//! - **[`render`]** — deterministic tree preview of the plan
//! - **[`commands`]** — top-level command orchestration
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod directives;
pub mod error;
pub mod link;
pub mod logging;
pub mod paths;
pub mod plan;
pub mod render;
