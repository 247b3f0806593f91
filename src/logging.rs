use tracing_subscriber::{fmt, EnvFilter};

/// Installs the global tracing subscriber, honoring `RUST_LOG` and
/// defaulting to `info`. Later calls are no-ops, so tests sharing a process
/// can all call it.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).with_target(false).try_init();
}
