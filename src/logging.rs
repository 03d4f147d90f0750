//! Logging setup.

use env_logger::{Builder, Target};
use log::LevelFilter;

pub fn level_for(verbose: u8, quiet: bool) -> LevelFilter {
    match (quiet, verbose) {
        (true, _) => LevelFilter::Error,
        (false, 0) => LevelFilter::Info,
        (false, 1) => LevelFilter::Debug,
        (false, _) => LevelFilter::Trace,
    }
}

/// Logs to stderr. `RUST_LOG` takes precedence over the command line level.
pub fn init_logging(verbose: u8, quiet: bool) {
    let level = level_for(verbose, quiet);

    Builder::new()
        .filter_level(level)
        // Renderer internals are noisy at debug level.
        .filter_module("wgpu_core", LevelFilter::Warn)
        .filter_module("wgpu_hal", LevelFilter::Warn)
        .filter_module("naga", LevelFilter::Warn)
        .parse_default_env()
        .target(Target::Stderr)
        .format_timestamp_secs()
        .init();

    log_panics::init();

    log::debug!("Logging initialized with level: {:?}", level);
}
