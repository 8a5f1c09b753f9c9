//! Optional subscriber setup for hosts that do not install their own.
//!
//! Allocation, provider fallback and cycle detection report through `tracing`
//! events only. Nothing is printed unless a subscriber is active.

/// Installs a compact stderr `fmt` subscriber filtered by `RUST_LOG`, or
/// `info` when unset.
///
/// Returns `false` without the `telemetry` feature, or when the process
/// already has a global subscriber.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .compact()
            .try_init()
            .is_ok()
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}
