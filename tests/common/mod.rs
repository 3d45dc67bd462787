//! Shared helpers for the integration tests.

use tracing_subscriber::EnvFilter;

/// Install a test-friendly subscriber once. Set `RUST_LOG=unrolled=trace` to
/// watch node transfers while a test runs.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
