//! Stderr logging, enabled only with `--verbose`.

use tracing_subscriber::EnvFilter;

/// Filter for the stderr subscriber: `None` unless `verbose`; `RUST_LOG` overrides the default.
pub fn stderr_filter(verbose: bool) -> Option<EnvFilter> {
    if !verbose {
        return None;
    }
    Some(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
}

/// Installs the stderr subscriber when `verbose`. Returns whether one was installed.
pub fn init_tracing(verbose: bool) -> bool {
    let Some(filter) = stderr_filter(verbose) else {
        return false;
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}
