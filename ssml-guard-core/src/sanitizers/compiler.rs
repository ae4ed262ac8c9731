//! compiler.rs - Compiles preserve-tag rules into a `PatternRegistry`.
//!
//! The registry is built once at startup and shared read-only (usually behind
//! an `Arc`) by every escaper that needs it. There is no global cache:
//! rebuilding means constructing a new registry.
//!
//! License: MIT OR APACHE 2.0

use log::debug;
use regex::{Regex, RegexBuilder};

use crate::config::{PatternRule, SsmlConfig};
use crate::errors::SsmlError;

/// Upper bound on a single compiled pattern.
const COMPILED_SIZE_LIMIT: usize = 10 * (1 << 20);

/// A single compiled preserve pattern.
#[derive(Debug)]
pub struct CompiledPattern {
    /// The rule name as configured.
    pub name: String,
    /// The compiled regular expression.
    pub regex: Regex,
    /// Rule name reduced to characters that survive markup escaping untouched.
    placeholder_tag: String,
}

impl CompiledPattern {
    pub(crate) fn placeholder_tag(&self) -> &str {
        &self.placeholder_tag
    }
}

/// Ordered, immutable collection of compiled preserve patterns.
///
/// Iteration order is the order the rules were supplied in, and that order
/// is the escaper's precedence.
#[derive(Debug)]
pub struct PatternRegistry {
    patterns: Vec<CompiledPattern>,
}

impl PatternRegistry {
    /// Compiles every rule, failing on the first invalid pattern.
    pub fn new(rules: &[PatternRule]) -> Result<Self, SsmlError> {
        compile_patterns(rules)
    }

    /// Builds a registry from a loaded configuration.
    pub fn from_config(config: &SsmlConfig) -> Result<Self, SsmlError> {
        compile_patterns(&config.preserve_tags)
    }

    /// Looks up a compiled pattern by rule name. With duplicate names the
    /// first rule wins.
    pub fn get(&self, name: &str) -> Option<&Regex> {
        self.patterns.iter().find(|p| p.name == name).map(|p| &p.regex)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CompiledPattern> {
        self.patterns.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(|p| p.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// Compiles a list of `PatternRule`s into a `PatternRegistry`.
/// Nothing is returned unless every rule compiles.
pub fn compile_patterns(rules: &[PatternRule]) -> Result<PatternRegistry, SsmlError> {
    debug!("Starting compilation of {} preserve patterns.", rules.len());

    let mut patterns = Vec::with_capacity(rules.len());
    for rule in rules {
        debug!(
            "Attempting to compile rule: '{}' with pattern '{:?}'",
            &rule.name, &rule.pattern
        );

        let regex = RegexBuilder::new(&rule.pattern)
            .multi_line(rule.multiline)
            .dot_matches_new_line(rule.dot_matches_new_line)
            .case_insensitive(rule.case_insensitive)
            .size_limit(COMPILED_SIZE_LIMIT)
            .build()
            .map_err(|source| SsmlError::PatternCompile {
                rule_name: rule.name.clone(),
                source,
            })?;

        patterns.push(CompiledPattern {
            name: rule.name.clone(),
            regex,
            placeholder_tag: placeholder_tag(&rule.name),
        });
    }

    debug!("Finished compiling preserve patterns. Total compiled: {}.", patterns.len());
    Ok(PatternRegistry { patterns })
}

fn placeholder_tag(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '-' { c } else { '_' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_supplied_order() {
        let registry = PatternRegistry::new(&[
            PatternRule::new("zeta", "z"),
            PatternRule::new("alpha", "a"),
            PatternRule::new("mid", "m"),
        ])
        .unwrap();
        let names: Vec<&str> = registry.names().collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn unbalanced_pattern_names_the_rule() {
        let err = PatternRegistry::new(&[
            PatternRule::new("fine", "<break/>"),
            PatternRule::new("broken", "("),
        ])
        .unwrap_err();

        assert_eq!(err.rule_name(), Some("broken"));
        assert!(err.to_string().contains("'broken'"));
        assert!(matches!(err, SsmlError::PatternCompile { .. }));
    }

    #[test]
    fn rule_flags_reach_the_regex() {
        let mut rule = PatternRule::new("break", "<BREAK/>");
        rule.case_insensitive = true;
        let registry = PatternRegistry::new(&[rule]).unwrap();
        assert!(registry.get("break").unwrap().is_match("<break/>"));
        assert!(registry.get("missing").is_none());
    }

    #[test]
    fn placeholder_tag_drops_markup_characters() {
        assert_eq!(placeholder_tag("say-as"), "say-as");
        assert_eq!(placeholder_tag("mstts:<x>&"), "mstts__x__");
    }
}
