//! Command implementations for the ssml-guard CLI.

pub mod rules;
pub mod sanitize;
