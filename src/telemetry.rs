//! Telemetry helpers for applications embedding `thermo-gauge`.
//!
//! The crate only emits `tracing` events (controller cycles, gauge redraws,
//! surface flushes). Hosts either call one of the helpers below or install
//! their own subscriber.

/// Default directive used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "info";

/// Installs a compact fmt subscriber filtered by `RUST_LOG`, falling back to
/// [`DEFAULT_FILTER`].
///
/// Returns `false` when the `telemetry` feature is disabled or a global
/// subscriber is already set.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_fallback(DEFAULT_FILTER)
}

/// Same as [`init_default_tracing`] with a caller-chosen fallback directive,
/// e.g. `"thermo_gauge=trace"` to follow every attach/detach.
#[must_use]
pub fn init_tracing_with_fallback(fallback_filter: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback_filter));
        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback_filter;
        false
    }
}

#[cfg(all(test, not(feature = "telemetry")))]
mod tests {
    use super::init_default_tracing;

    #[test]
    fn disabled_feature_never_installs_subscriber() {
        assert!(!init_default_tracing());
    }
}
