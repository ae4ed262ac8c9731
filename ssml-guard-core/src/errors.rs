//! errors.rs - Custom error types for the ssml-guard-core library.
//!
//! Only registry construction and configuration validation can fail. The two
//! text transformations are total and have no error channel.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

/// All error types produced by the `ssml-guard-core` library.
///
/// Marked `#[non_exhaustive]` so new variants can be added without breaking
/// downstream matches.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SsmlError {
    /// A configured preserve pattern is not a valid regular expression.
    /// Fatal to registry construction; no partial registry is produced.
    #[error("Failed to compile preserve pattern '{rule_name}': {source}")]
    PatternCompile {
        rule_name: String,
        #[source]
        source: regex::Error,
    },

    #[error("Invalid preserve-tag configuration:\n{0}")]
    InvalidConfig(String),
}

impl SsmlError {
    /// Name of the rule that caused the error, when there is one.
    pub fn rule_name(&self) -> Option<&str> {
        match self {
            SsmlError::PatternCompile { rule_name, .. } => Some(rule_name.as_str()),
            SsmlError::InvalidConfig(_) => None,
        }
    }
}
