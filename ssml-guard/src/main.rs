// ssml-guard/src/main.rs
//! ssml-guard entry point.
//!
//! Parses arguments, initializes logging and dispatches to a command.

use anyhow::Result;
use clap::Parser;

use ssml_guard::cli::{Cli, Commands};
use ssml_guard::commands::{rules, sanitize};
use ssml_guard::logger;
use ssml_guard_core::HeadlessMode;

fn main() -> Result<()> {
    let args = Cli::parse();

    if args.quiet {
        logger::init_logger(Some(log::LevelFilter::Off));
    } else if args.debug {
        logger::init_logger(Some(log::LevelFilter::Debug));
    } else {
        logger::init_logger(None);
    }

    match &args.command {
        Commands::Escape(cmd) => sanitize::run_sanitize(HeadlessMode::Escape, cmd),
        Commands::Strip(cmd) => sanitize::run_sanitize(HeadlessMode::Strip, cmd),
        Commands::Prepare(cmd) => sanitize::run_sanitize(HeadlessMode::Prepare, cmd),
        Commands::Rules(cmd) => rules::run_rules(cmd),
    }
}
