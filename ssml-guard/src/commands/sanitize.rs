//! The `escape`, `strip` and `prepare` commands.

use anyhow::{Context, Result};
use log::{debug, info};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use ssml_guard_core::{
    headless_sanitize_string, merge_rules, HeadlessMode, PatternRegistry, SsmlConfig,
};

use crate::cli::{RuleSourceArgs, SanitizeCommand};

/// Candidate user config, used only when `--config` is absent and the file exists.
pub fn default_user_config_path() -> Option<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join("ssml-guard").join("config.yaml"))
        .filter(|path| path.is_file())
}

/// Builds the active rule list: defaults, merged user file, enable/disable filters.
pub fn resolve_config(args: &RuleSourceArgs) -> Result<SsmlConfig> {
    let defaults = if args.no_defaults {
        debug!("Built-in preserve-tag rules disabled.");
        SsmlConfig::default()
    } else {
        SsmlConfig::load_default_rules()?
    };

    let user_path = args.config.clone().or_else(default_user_config_path);
    let user_config = match user_path {
        Some(path) => Some(
            SsmlConfig::load_from_file(&path)
                .with_context(|| format!("Failed to load rules from {}", path.display()))?,
        ),
        None => None,
    };

    let mut config = merge_rules(defaults, user_config);
    config.set_active_rules(&args.enable, &args.disable);
    config.validate()?;
    Ok(config)
}

/// Compiles the active rules once for the whole run.
pub fn build_registry(args: &RuleSourceArgs) -> Result<Arc<PatternRegistry>> {
    let config = resolve_config(args)?;
    let registry =
        PatternRegistry::from_config(&config).context("Failed to build preserve-tag registry")?;
    info!("Compiled {} preserve-tag rules.", registry.len());
    Ok(Arc::new(registry))
}

/// The main operation runner for the text commands.
pub fn run_sanitize(mode: HeadlessMode, cmd: &SanitizeCommand) -> Result<()> {
    info!("Starting {:?} operation.", mode);

    let registry = match mode {
        // The stripper never consults preserve rules.
        HeadlessMode::Strip => Arc::new(PatternRegistry::new(&[])?),
        HeadlessMode::Escape | HeadlessMode::Prepare => build_registry(&cmd.rules)?,
    };

    let input = read_input(cmd.input_file.as_deref())?;
    let output = headless_sanitize_string(registry, &input, mode);
    debug!(
        "Content processed. Input length: {}, output length: {}",
        input.len(),
        output.len()
    );

    write_output(cmd.output.as_deref(), &output)?;
    info!("{:?} operation completed.", mode);
    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file: {}", path.display())),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read from stdin")?;
            Ok(buffer)
        }
    }
}

fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            info!("Writing output to file: {}", path.display());
            let mut file = fs::File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            write_terminated(&mut file, content)?;
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            write_terminated(&mut writer, content)?;
        }
    }
    Ok(())
}

/// Writes `content` followed by a newline unless it already ends with one.
fn write_terminated<W: Write>(writer: &mut W, content: &str) -> io::Result<()> {
    if content.ends_with('\n') {
        write!(writer, "{}", content)
    } else {
        writeln!(writer, "{}", content)
    }
}
