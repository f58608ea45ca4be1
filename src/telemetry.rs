//! Tracing initialization for consumers and integration tests.
//!
//! The crate itself only emits `tracing` events; installing a subscriber
//! is left to the embedding process. This helper wires the conventional
//! env-filtered formatter for hosts that have no opinion of their own.

use tracing_subscriber::EnvFilter;

/// Installs the global fmt subscriber, honoring `RUST_LOG`.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
