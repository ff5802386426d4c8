//! Tracing setup for the command-line binary.

use tracing_subscriber::EnvFilter;

/// Install a stderr subscriber.
///
/// `RUST_LOG` controls filtering and defaults to `warn`. `verbose` forces
/// debug output for this crate regardless of `RUST_LOG`. Diagnostics go to
/// stderr so they never mix with the progress commentary on stdout.
pub fn init_tracing(verbose: bool) {
    let env_filter = if verbose {
        EnvFilter::new("warn,patchdump=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}
