//! Opt-in tracing setup for hosts embedding the engine.
//!
//! The engine only ever emits `tracing` events; it never installs a
//! subscriber on its own. Hosts that already run `tracing` need nothing from
//! here. Everyone else can enable the `telemetry` feature and call
//! [`init_default_tracing`] once at startup.

/// Default directive applied when `RUST_LOG` is unset.
#[cfg(feature = "telemetry")]
const DEFAULT_FILTER: &str = "cascade_rs=debug,info";

/// Installs a compact stderr subscriber honoring `RUST_LOG`.
///
/// Returns `false` without side effects when the `telemetry` feature is off
/// or a global subscriber is already installed, so calling it from library
/// consumers is always safe.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_FILTER));

        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}
