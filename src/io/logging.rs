//! Tracing subscriber setup for the command-line tools

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset
pub const fn default_directive(quiet: bool, verbose: bool) -> &'static str {
    match (quiet, verbose) {
        (true, _) => "signalgrid=warn",
        (false, true) => "signalgrid=debug",
        (false, false) => "signalgrid=info",
    }
}

/// Install a formatting subscriber writing to stderr
///
/// `RUST_LOG` takes precedence over the flags. Returns `false` if a global
/// subscriber was already installed.
pub fn init_logging(quiet: bool, verbose: bool) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(quiet, verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .is_ok()
}
