//! The apply command.
use std::path::Path;

use anyhow::Result;

use crate::logging::Logger;
use crate::{link, plan, render};

/// Run the apply command: generate the plan, print it, then create the
/// symlinks.
///
/// # Errors
///
/// Returns an error if plan generation fails or if any destination
/// conflicts — in the conflict case every conflict has been reported and
/// nothing was created.
pub fn run(source: &Path, log: &Logger) -> Result<()> {
    log.stage("Generating plan");
    let plan = plan::generate(source, log)?;
    log.info(&format!("{} file(s) planned", plan.len()));

    // The rendered tree is the product output, not a log line.
    #[allow(clippy::print_stdout)]
    {
        print!("{}", render::render(&plan));
    }

    log.stage("Executing link");
    let report = link::execute(&plan, log)?;
    log.info(&format!(
        "{} linked, {} already ok",
        report.created, report.already_ok
    ));
    Ok(())
}
