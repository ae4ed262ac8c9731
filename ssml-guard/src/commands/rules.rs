//! The `rules` command: shows the preserve-tag rules that `escape` would apply.

use anyhow::{Context, Result};
use std::io::{self, Write};

use ssml_guard_core::{PatternRegistry, PatternRule};

use crate::cli::RulesCommand;
use crate::commands::sanitize::resolve_config;

pub fn run_rules(cmd: &RulesCommand) -> Result<()> {
    let config = resolve_config(&cmd.rules)?;
    // Listing a rule that would not compile is misleading; fail the same way `escape` does.
    PatternRegistry::from_config(&config).context("Failed to build preserve-tag registry")?;

    let stdout = io::stdout();
    let mut writer = stdout.lock();
    if cmd.json {
        let json = serde_json::to_string_pretty(&config.preserve_tags)
            .context("Failed to serialize rules")?;
        writeln!(writer, "{}", json)?;
    } else {
        print_table(&mut writer, &config.preserve_tags)?;
    }
    Ok(())
}

fn print_table<W: Write>(writer: &mut W, rules: &[PatternRule]) -> io::Result<()> {
    let width = rules.iter().map(|r| r.name.len()).max().unwrap_or(0);
    for (index, rule) in rules.iter().enumerate() {
        writeln!(writer, "{:>2}. {:<width$}  {}", index + 1, rule.name, rule.pattern, width = width)?;
    }
    Ok(())
}
