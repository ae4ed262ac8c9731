// ssml-guard/src/cli.rs
//! This file defines the command-line interface (CLI) for the ssml-guard
//! application, including all available commands and their arguments.
//! License: MIT OR Apache-2.0

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "ssml-guard",
    author = "Obscura Team (Relay)",
    version = env!("CARGO_PKG_VERSION"),
    about = "Make text safe for SSML speech synthesis",
    long_about = "ssml-guard prepares text for speech-synthesis APIs that accept SSML. It can escape markup while keeping a whitelist of SSML tags verbatim, strip Markdown formatting, links and URLs so they are not read aloud, or do both in one pass.",
    arg_required_else_help = true,
)]
pub struct Cli {
    /// Disable informational messages
    #[arg(long, short = 'q', global = true, help = "Suppress all log output.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG)
    #[arg(long, short = 'd', global = true, help = "Enable debug logging.")]
    pub debug: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// All available commands for the `ssml-guard` CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Escapes markup characters, keeping preserve-tag matches verbatim.
    #[command(about = "Escape markup characters, keeping whitelisted SSML tags verbatim.")]
    Escape(SanitizeCommand),

    /// Strips Markdown formatting, links, URLs and emails.
    #[command(about = "Strip Markdown formatting, links, URLs and emails.")]
    Strip(SanitizeCommand),

    /// Strips, then escapes.
    #[command(about = "Strip Markdown, then escape while keeping whitelisted SSML tags.")]
    Prepare(SanitizeCommand),

    /// Lists the active preserve-tag rules.
    #[command(about = "List the active preserve-tag rules in precedence order.")]
    Rules(RulesCommand),
}

/// Where preserve-tag rules come from and which of them are active.
#[derive(Args, Debug, Clone, Default)]
pub struct RuleSourceArgs {
    /// Path to a YAML configuration file with preserve-tag rules.
    #[arg(
        long = "config",
        value_name = "FILE",
        env = "SSML_GUARD_CONFIG",
        help = "Path to a YAML file with preserve-tag rules (full app config or bare `preserve_tags` list)."
    )]
    pub config: Option<PathBuf>,

    /// Ignore the built-in SSML rules.
    #[arg(long = "no-defaults", help = "Do not load the built-in SSML preserve-tag rules.")]
    pub no_defaults: bool,

    /// Explicitly enable these rule names (comma-separated).
    #[arg(long, short = 'e', value_delimiter = ',', help = "Enable rules marked `enabled: false` (comma-separated).")]
    pub enable: Vec<String>,

    /// Explicitly disable these rule names (comma-separated).
    #[arg(long, short = 'x', value_delimiter = ',', help = "Disable these rule names (comma-separated).")]
    pub disable: Vec<String>,
}

/// Arguments shared by `escape`, `strip` and `prepare`.
#[derive(Parser, Debug)]
pub struct SanitizeCommand {
    /// Path to an input file (reads from stdin if not provided).
    #[arg(long, short = 'i', value_name = "FILE", help = "Read input from a specified file instead of stdin.")]
    pub input_file: Option<PathBuf>,

    /// Write output to this file instead of stdout.
    #[arg(long, short = 'o', value_name = "FILE", help = "Write output to a specified file instead of stdout.")]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub rules: RuleSourceArgs,
}

/// Arguments for the `rules` command.
#[derive(Parser, Debug)]
pub struct RulesCommand {
    #[command(flatten)]
    pub rules: RuleSourceArgs,

    /// Print the rules as JSON.
    #[arg(long = "json", help = "Print the active rules as JSON to stdout.")]
    pub json: bool,
}
