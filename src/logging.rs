//! Logger set-up for the binary and the tests.

use log::LevelFilter;
use std::io::Write;

/// Log to stderr at `Info`, or `Debug` when `verbose`.  `RUST_LOG`
/// overrides both.
pub fn init(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    env_logger::Builder::new()
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .filter_level(level)
        .parse_default_env()
        .target(env_logger::Target::Stderr)
        .init();
}

/// Debug logging captured by the test harness.  Safe to call repeatedly.
pub fn init_test() {
    let _ = env_logger::Builder::new()
        .filter_level(LevelFilter::Debug)
        .is_test(true)
        .try_init();
}
