//! Logger setup for the ssml-guard binary.

use log::LevelFilter;

/// Initializes `env_logger` on stderr.
///
/// `RUST_LOG` is honoured (default `warn`) unless `level_override` is given.
pub fn init_logger(level_override: Option<LevelFilter>) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Some(level) = level_override {
        builder.filter_level(level);
    }
    builder
        .format_timestamp(None)
        .target(env_logger::Target::Stderr);

    // A second init (tests, embedding) is not an error worth surfacing.
    let _ = builder.try_init();
}
