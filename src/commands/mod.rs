//! Top-level command orchestration (`plan` preview and `link` apply).
pub mod link;
pub mod plan;
