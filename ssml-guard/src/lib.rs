// ssml-guard/src/lib.rs
//! # ssml-guard CLI Application
//!
//! Command-line front end for `ssml-guard-core`. Reads text from stdin or a
//! file, escapes and/or strips it, and writes the result to stdout or a file.

pub mod cli;
pub mod commands;
pub mod logger;
