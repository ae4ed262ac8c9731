//! Pattern compilation for the escaper.
//!
//! Turns configured preserve-tag rules into an immutable `PatternRegistry`
//! that is built once and shared by every escape call.

pub mod compiler;
