// bmtrace/src/logger.rs
//! Internal diagnostics for the `bmtrace` binary.
//!
//! This is the `log`/`env_logger` channel used by the program and by
//! `bmtrace-core` to describe what they are doing. It is unrelated to the
//! trace sink, which carries the user's data.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Initializes `env_logger`, writing to stderr.
///
/// `RUST_LOG` is honoured (default `warn`) unless `level` overrides it.
/// Calling this twice is harmless.
pub fn init_logger(level: Option<LevelFilter>) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    if let Some(level) = level {
        builder.filter_level(level);
    }
    builder.format_timestamp(None).format_target(false);
    let _ = builder.try_init();
}

/// Maps the `--debug` / `--quiet` flags to a level override.
pub fn level_from_flags(debug: bool, quiet: bool) -> Option<LevelFilter> {
    if quiet {
        Some(LevelFilter::Off)
    } else if debug {
        Some(LevelFilter::Debug)
    } else {
        None
    }
}
