//! Utilities: logging setup (tracing-subscriber on stderr, level from -v/-q).
//!
//! Key items:
//!   derive_level / init_logging
//!
//! `RUST_LOG` wins over the flags when set, e.g. `RUST_LOG=tap_remote=trace`.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

/// -q -> errors only; default info; -v debug; -vv and up trace.
pub fn derive_level(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::ERROR;
    }
    match verbose {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Install the global subscriber. Logs go to stderr so `--json` output on
/// stdout stays machine readable.
pub fn init_logging(level: LevelFilter) {
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
