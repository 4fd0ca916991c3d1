//! Binary entry point for `mudot`.
use anyhow::Result;
use clap::Parser;

use mudot::cli::Cli;
use mudot::commands;
use mudot::logging::Logger;

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = Cli::parse();
    let log = Logger::init(args.verbose);

    let version = option_env!("MUDOT_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
    log.debug(&format!("mudot {version}"));

    if args.link {
        commands::link::run(&args.source, &log)
    } else {
        commands::plan::run(&args.source, &log)
    }
}
