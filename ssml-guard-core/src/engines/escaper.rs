//! A `SanitizationEngine` that escapes markup-significant characters while
//! keeping whitelisted SSML tags verbatim.
//!
//! Each preserved span is swapped for a placeholder, the remaining text is
//! escaped, then the placeholders are swapped back. Rules run in registry
//! order, and a span taken by an earlier rule cannot be matched again by a
//! later one.
//!
//! Known limitation: if the input already contains a literal
//! `__SSML_PLACEHOLDER_<name>_<n>__` token, restoration may substitute into
//! that text instead of the generated placeholder.
//!
//! License: MIT OR APACHE 2.0

use std::sync::Arc;

use log::{debug, trace};
use regex::Captures;

use crate::engine::SanitizationEngine;
use crate::sanitizers::compiler::PatternRegistry;

const PLACEHOLDER_PREFIX: &str = "__SSML_PLACEHOLDER_";

#[derive(Debug, Clone)]
pub struct TagPreservingEscaper {
    registry: Arc<PatternRegistry>,
}

impl TagPreservingEscaper {
    pub fn new(registry: Arc<PatternRegistry>) -> Self {
        Self { registry }
    }

    /// Escapes `text`, leaving every preserved span untouched.
    pub fn escape(&self, text: &str) -> String {
        let mut placeholders: Vec<(String, String)> = Vec::new();
        let mut counter: usize = 0;
        let mut working = text.to_string();

        for pattern in self.registry.iter() {
            let tag = pattern.placeholder_tag();
            let replaced = pattern.regex.replace_all(&working, |caps: &Captures| {
                let placeholder = format!("{}{}_{}__", PLACEHOLDER_PREFIX, tag, counter);
                counter += 1;
                placeholders.push((placeholder.clone(), caps[0].to_string()));
                placeholder
            });
            working = replaced.into_owned();
        }

        let mut escaped = html_escape::encode_quoted_attribute(&working).into_owned();

        // Reverse order: a later rule may have swallowed an earlier placeholder.
        for (placeholder, original) in placeholders.iter().rev() {
            trace!("Restoring {} -> {:?}", placeholder, original);
            escaped = escaped.replacen(placeholder.as_str(), original, 1);
        }

        debug!(
            "Escaped {} bytes, preserved {} span(s) across {} rule(s).",
            text.len(),
            placeholders.len(),
            self.registry.len()
        );
        escaped
    }
}

impl SanitizationEngine for TagPreservingEscaper {
    fn name(&self) -> &'static str {
        "escape"
    }

    fn sanitize(&self, content: &str) -> String {
        self.escape(content)
    }
}
