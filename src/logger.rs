use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

/// Log level implied by the `--quiet` / `--verbose` flags.
pub fn default_directive(quiet: bool, verbose: bool) -> &'static str {
    if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "info"
    }
}

/// Install the global subscriber. `RUST_LOG` wins over the flags.
///
/// Logs go to stderr so stdout only carries the summaries. Colors are only
/// used when stderr is a terminal.
pub fn init_logging(quiet: bool, verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(quiet, verbose)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}
