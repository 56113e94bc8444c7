//! Core of the Darkstar cache-flush gateway: request validation, the
//! fan-out aggregator and configuration loading.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod logging;
pub mod plugins;

use std::sync::Arc;

pub use application::FanOutAggregator;
pub use domain::{
    validate_aggregate,
    validate_flush,
    AggregateBody,
    AggregateResult,
    FlushRequest,
    ScopeKind,
    ValidationError,
};
pub use infrastructure::{
    build_client,
    ConfigLoadError,
    ConfigLoader,
    GatewayConfig,
};
pub use plugins::create_plugin_registry;

/// Everything a front end needs, built once from the configuration
pub struct CoreContext {
    pub config: GatewayConfig,
    pub aggregator: Arc<FanOutAggregator>,
}

impl CoreContext {
    pub fn new(config: GatewayConfig) -> reqwest::Result<Self> {
        let client = build_client(&config.http)?;
        let registry = create_plugin_registry(&config, client);
        let aggregator = FanOutAggregator::new(Arc::new(registry))
            .with_provider_timeout(config.aggregator.provider_timeout());

        Ok(Self {
            config,
            aggregator: Arc::new(aggregator),
        })
    }
}
