// ssml-guard-core/src/lib.rs
//! # ssml-guard Core Library
//!
//! `ssml-guard-core` prepares user text for a speech-synthesis API that takes
//! SSML. It has two independent, pure transformations:
//!
//! * **Tag-preserving escaping**: markup-significant characters are escaped,
//!   except inside spans matched by a configured whitelist of preserve
//!   patterns (e.g. `<break time="200ms"/>`), which pass through verbatim.
//! * **Markup stripping**: Markdown formatting, links, images, quotes, rules,
//!   URLs and emails are removed so the engine does not read symbols aloud.
//!
//! ## Modules
//!
//! * `config`: `PatternRule` and `SsmlConfig`, YAML loading, merging and filtering.
//! * `sanitizers`: compiles rules into an immutable `PatternRegistry`.
//! * `engine`: the `SanitizationEngine` trait.
//! * `engines`: `TagPreservingEscaper` and `MarkupStripper`.
//! * `headless`: one-shot helpers that chain the engines.
//! * `errors`: the `SsmlError` type.
//!
//! ## Usage Example
//!
//! ```rust
//! use std::sync::Arc;
//! use ssml_guard_core::{PatternRegistry, PatternRule, TagPreservingEscaper, MarkupStripper};
//!
//! let registry = Arc::new(PatternRegistry::new(&[
//!     PatternRule::new("break", "<break[^>]*/>"),
//! ]).unwrap());
//! let escaper = TagPreservingEscaper::new(Arc::clone(&registry));
//!
//! assert_eq!(
//!     escaper.escape("Hello <break time=\"200ms\"/> & welcome"),
//!     "Hello <break time=\"200ms\"/> &amp; welcome"
//! );
//! assert_eq!(MarkupStripper::new().strip("Some **bold** text"), "Some bold text");
//! ```
//!
//! ## Error Handling
//!
//! Only registry construction and config validation fail, with [`SsmlError`].
//! Config file loading returns `anyhow::Result` with context.
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod config;
pub mod engine;
pub mod engines;
pub mod errors;
pub mod headless;
pub mod sanitizers;

pub use config::{merge_rules, PatternRule, SsmlConfig};

pub use errors::SsmlError;

pub use engine::SanitizationEngine;

pub use engines::escaper::TagPreservingEscaper;
pub use engines::stripper::MarkupStripper;

pub use headless::{build_engines, headless_sanitize_string, HeadlessMode};

pub use sanitizers::compiler::{compile_patterns, CompiledPattern, PatternRegistry};
