mod options;

pub use options::*;

use tracing_subscriber::EnvFilter;

/// Install a global `tracing` subscriber writing to stderr.
///
/// The filter comes from `RUST_LOG` and falls back to `warn`. Calling this more than once is
/// harmless: only the first subscriber is installed.
pub fn setup_logger() {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
  let _ = tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(filter)
    .try_init();
}

#[cfg(test)]
pub(crate) fn setup_test_logger() {
  let _ = tracing_subscriber::fmt()
    .with_test_writer()
    .with_env_filter(EnvFilter::from_default_env())
    .try_init();
}
