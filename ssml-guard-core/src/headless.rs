// File: ssml-guard-core/src/headless.rs

//! `headless.rs`
//! Convenience wrappers for one-shot, non-interactive use of the engines.
//!
//! `Prepare` chains the stripper and the escaper, which turns Markdown prose
//! with embedded SSML tags into text that can be dropped inside `<speak>`.

use std::sync::Arc;

use crate::engine::SanitizationEngine;
use crate::engines::escaper::TagPreservingEscaper;
use crate::engines::stripper::MarkupStripper;
use crate::sanitizers::compiler::PatternRegistry;

/// Selects which transformation a headless call performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadlessMode {
    /// Escape markup, keeping preserve-tag matches verbatim.
    Escape,
    /// Strip Markdown and links.
    Strip,
    /// Strip, then escape.
    Prepare,
}

/// Builds the engine chain for `mode`, in application order.
pub fn build_engines(
    registry: Arc<PatternRegistry>,
    mode: HeadlessMode,
) -> Vec<Box<dyn SanitizationEngine>> {
    match mode {
        HeadlessMode::Escape => vec![Box::new(TagPreservingEscaper::new(registry))],
        HeadlessMode::Strip => vec![Box::new(MarkupStripper::new())],
        HeadlessMode::Prepare => vec![
            Box::new(MarkupStripper::new()),
            Box::new(TagPreservingEscaper::new(registry)),
        ],
    }
}

/// Runs `content` through the engines selected by `mode`.
pub fn headless_sanitize_string(
    registry: Arc<PatternRegistry>,
    content: &str,
    mode: HeadlessMode,
) -> String {
    build_engines(registry, mode)
        .iter()
        .fold(content.to_string(), |text, engine| {
            log::debug!("Applying '{}' engine.", engine.name());
            engine.sanitize(&text)
        })
}
