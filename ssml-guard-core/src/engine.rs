// ssml-guard-core/src/engine.rs
//! Defines the core SanitizationEngine trait.
//!
//! Both text transformers implement it, so callers can hold either behind a
//! `Box<dyn SanitizationEngine>` or chain them in a fixed order.
//!
//! License: MIT OR APACHE 2.0

/// A pure text transformation applied before text reaches the speech engine.
///
/// Implementations are total: every input string produces an output string.
pub trait SanitizationEngine: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Transforms `content` and returns the result.
    fn sanitize(&self, content: &str) -> String;
}
