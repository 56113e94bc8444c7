use tracing_subscriber::{
    fmt,
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

pub const DEFAULT_LOG_FILTER: &str =
    "darkstar=info,darkstar_core=info,darkstar_web=info,tower_http=info";

/// Installs the global subscriber; `RUST_LOG` takes precedence over the
/// default filter
pub fn init() {
    init_with_default(DEFAULT_LOG_FILTER);
}

pub fn init_with_default(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_thread_ids(false))
        .init();
}

pub fn init_dev() {
    init_with_default("darkstar=debug,darkstar_core=debug,darkstar_web=debug,tower_http=debug");
}
