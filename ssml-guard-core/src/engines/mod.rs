//! Concrete `SanitizationEngine` implementations.
//!
//! * `escaper`: escapes markup while keeping whitelisted SSML tags verbatim.
//! * `stripper`: removes Markdown formatting so it is not read aloud.

pub mod escaper;
pub mod stripper;
