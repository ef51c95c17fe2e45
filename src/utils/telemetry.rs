//! Logging Setup
//!
//! The library only emits `tracing` events. Binaries and test suites that
//! want to see them call [`init_tracing`] once; later calls are no-ops.

use std::sync::Once;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

const DEFAULT_FILTER: &str = "typeclass_laws=info";

static INIT: Once = Once::new();

/// Installs a global fmt subscriber filtered by `RUST_LOG`
/// (default `typeclass_laws=info`).
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        // Another subscriber may already be installed by the host; keep it.
        let _ = Registry::default()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_target(false))
            .try_init();
    });
}
