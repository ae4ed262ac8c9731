//! Configuration management for `ssml-guard-core`.
//!
//! This module defines the preserve-tag rules that the escaper keeps verbatim,
//! and handles loading them from YAML, merging user rules over the embedded
//! defaults and filtering the active set.
//!
//! A configuration file may be the full application file, in which case only
//! its `ssml:` section is read, or a bare file with a top-level
//! `preserve_tags:` list.
//!
//! License: MIT OR Apache-2.0

use anyhow::{anyhow, Context, Result};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::errors::SsmlError;

/// A single named preserve pattern.
///
/// Rules are applied in the order they appear in their `SsmlConfig`; a span
/// consumed by an earlier rule is invisible to later ones.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct PatternRule {
    /// Unique identifier for the rule (e.g., "break").
    pub name: String,
    /// The regex pattern string.
    pub pattern: String,
    /// Human-readable description of what the rule keeps.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// If true, `^` and `$` match at line boundaries.
    pub multiline: bool,
    /// If true, `.` also matches newlines.
    pub dot_matches_new_line: bool,
    /// If true, the pattern matches case-insensitively.
    pub case_insensitive: bool,
    /// Explicit override for enabling/disabling the rule.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

impl Default for PatternRule {
    fn default() -> Self {
        Self {
            name: String::new(),
            pattern: String::new(),
            description: None,
            multiline: false,
            dot_matches_new_line: false,
            case_insensitive: false,
            enabled: None,
        }
    }
}

impl PatternRule {
    /// Builds a rule with default flags.
    pub fn new(name: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pattern: pattern.into(),
            ..Self::default()
        }
    }
}

/// The ordered list of preserve-tag rules.
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct SsmlConfig {
    pub preserve_tags: Vec<PatternRule>,
}

/// On-disk shape. Sections other than `ssml` belong to the wider application
/// and are ignored here.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    ssml: Option<SsmlConfig>,
    #[serde(default)]
    preserve_tags: Option<Vec<PatternRule>>,
}

impl SsmlConfig {
    /// Parses a YAML document in either supported shape and validates it.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let file: ConfigFile = serde_yml::from_str(text).context("Failed to parse YAML")?;

        let config = match (file.ssml, file.preserve_tags) {
            (Some(section), _) => section,
            (None, Some(preserve_tags)) => SsmlConfig { preserve_tags },
            (None, None) => {
                return Err(anyhow!(
                    "Configuration has neither an `ssml.preserve_tags` section nor a top-level `preserve_tags` list"
                ))
            }
        };

        config.validate()?;
        Ok(config)
    }

    /// Loads preserve-tag rules from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading preserve-tag rules from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_yaml_str(&text)
            .with_context(|| format!("Failed to load config file {}", path.display()))?;

        info!(
            "Loaded {} preserve-tag rules from file {}.",
            config.preserve_tags.len(),
            path.display()
        );
        Ok(config)
    }

    /// Loads the built-in SSML preserve-tag rules.
    pub fn load_default_rules() -> Result<Self> {
        debug!("Loading default preserve-tag rules from embedded string...");
        let default_yaml = include_str!("../config/default_tags.yaml");
        let config = Self::from_yaml_str(default_yaml).context("Failed to parse default rules")?;

        debug!("Loaded {} default preserve-tag rules.", config.preserve_tags.len());
        Ok(config)
    }

    /// Filters active rules.
    ///
    /// A rule is dropped when it is named in `disable_rules`, or when it is
    /// marked `enabled: false` and not named in `enable_rules`.
    pub fn set_active_rules(&mut self, enable_rules: &[String], disable_rules: &[String]) {
        let enable_set: HashSet<&str> = enable_rules.iter().map(String::as_str).collect();
        let disable_set: HashSet<&str> = disable_rules.iter().map(String::as_str).collect();

        let all_rule_names: HashSet<&str> =
            self.preserve_tags.iter().map(|r| r.name.as_str()).collect();

        for rule_name in enable_set.difference(&all_rule_names) {
            warn!("Rule '{}' in `enable` list does not exist.", rule_name);
        }
        for rule_name in disable_set.difference(&all_rule_names) {
            warn!("Rule '{}' in `disable` list does not exist.", rule_name);
        }

        debug!("Preserve rules before filtering: {}", self.preserve_tags.len());
        self.preserve_tags.retain(|rule| {
            let name = rule.name.as_str();
            !disable_set.contains(name)
                && (rule.enabled != Some(false) || enable_set.contains(name))
        });
        debug!("Preserve rules after filtering: {}", self.preserve_tags.len());
    }

    /// Checks structural integrity: non-empty unique names, non-empty patterns.
    ///
    /// Regex validity is left to `PatternRegistry::new`, which reports the
    /// offending rule by name.
    pub fn validate(&self) -> Result<(), SsmlError> {
        let mut rule_names = HashSet::new();
        let mut errors = Vec::new();

        for rule in &self.preserve_tags {
            if rule.name.is_empty() {
                errors.push("A rule has an empty `name` field.".to_string());
            } else if !rule_names.insert(rule.name.as_str()) {
                errors.push(format!("Duplicate rule name found: '{}'.", rule.name));
            }

            if rule.pattern.is_empty() {
                errors.push(format!("Rule '{}' has an empty `pattern` field.", rule.name));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SsmlError::InvalidConfig(errors.join("\n")))
        }
    }
}

/// Merges user rules over the defaults.
///
/// Order is significant: a user rule that shares a name with a default
/// replaces it in place, any other user rule is appended after the defaults.
pub fn merge_rules(default_config: SsmlConfig, user_config: Option<SsmlConfig>) -> SsmlConfig {
    debug!(
        "merge_rules called. Default rules count: {}",
        default_config.preserve_tags.len()
    );
    let mut merged = default_config.preserve_tags;

    if let Some(user_cfg) = user_config {
        debug!("Merging {} user rules.", user_cfg.preserve_tags.len());
        for user_rule in user_cfg.preserve_tags {
            match merged.iter_mut().find(|r| r.name == user_rule.name) {
                Some(existing) => {
                    debug!("User rule '{}' overrides the default.", user_rule.name);
                    *existing = user_rule;
                }
                None => merged.push(user_rule),
            }
        }
    }

    debug!("Final total rules after merge: {}", merged.len());
    SsmlConfig { preserve_tags: merged }
}
