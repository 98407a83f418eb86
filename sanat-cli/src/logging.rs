use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Maps the number of `-v` flags to a log level: warnings by default,
/// `-v` for info and `-vv` (or more) for debug.
pub fn level_for_verbosity(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    }
}

/// Installs the stderr subscriber. `RUST_LOG` directives are honored on top
/// of the verbosity level.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::from_default_env().add_directive(level_for_verbosity(verbosity).into());
    // A subscriber may already be installed (e.g. in tests); keep that one.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
