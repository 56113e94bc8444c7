use darkstar_plugin_api::{
    PluginRegistry,
    ProviderKind,
};

use crate::infrastructure::GatewayConfig;

/// Registers every built-in adapter, honoring configured endpoint overrides
pub fn create_plugin_registry(config: &GatewayConfig, client: reqwest::Client) -> PluginRegistry {
    let mut registry = PluginRegistry::new();

    darkstar_plugin_keycdn::register(
        &mut registry,
        client.clone(),
        config.base_url(ProviderKind::KeyCdn),
    );
    darkstar_plugin_fastly::register(
        &mut registry,
        client.clone(),
        config.base_url(ProviderKind::Fastly),
    );
    darkstar_plugin_fasterize::register(
        &mut registry,
        client.clone(),
        config.base_url(ProviderKind::Fasterize),
    );
    darkstar_plugin_incapsula::register(
        &mut registry,
        client,
        config.base_url(ProviderKind::Incapsula),
    );
    darkstar_plugin_cloudfront::register(
        &mut registry,
        config.http.timeout(),
        config.base_url(ProviderKind::CloudFront),
    );

    tracing::info!(plugins = registry.count(), "Plugin registry ready");

    registry
}
