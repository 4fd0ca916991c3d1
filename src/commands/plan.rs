//! The preview command.
use std::path::Path;

use anyhow::Result;

use crate::logging::Logger;
use crate::{plan, render};

/// Run the preview command: generate the plan and print it as a tree.
///
/// # Errors
///
/// Returns an error if plan generation fails (malformed directive,
/// unmapped leaf, or unreadable source tree).
pub fn run(source: &Path, log: &Logger) -> Result<()> {
    log.stage("Generating plan");
    let plan = plan::generate(source, log)?;
    log.info(&format!("{} file(s) planned", plan.len()));

    // The rendered tree is the product output, not a log line.
    #[allow(clippy::print_stdout)]
    {
        print!("{}", render::render(&plan));
    }
    Ok(())
}
