use std::collections::BTreeMap;

use crate::plugin::{
    Plugin,
    PluginMetadata,
};
use crate::types::ProviderKind;

/// Plugin registry - maps each provider to its adapter, built once at startup
pub struct PluginRegistry {
    plugins: BTreeMap<ProviderKind, Box<dyn Plugin>>,
}

impl PluginRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            plugins: BTreeMap::new(),
        }
    }

    /// Register a plugin, replacing any previous one for the same provider
    pub fn register(&mut self, plugin: Box<dyn Plugin>) {
        self.plugins.insert(plugin.provider_type(), plugin);
    }

    /// Get a plugin by provider type
    pub fn get(&self, provider_type: ProviderKind) -> Option<&dyn Plugin> {
        self.plugins.get(&provider_type).map(|p| p.as_ref())
    }

    /// Metadata of every registered plugin
    pub fn metadata(&self) -> Vec<PluginMetadata> {
        self.plugins.values().map(|p| p.metadata().clone()).collect()
    }

    /// Get count of registered plugins
    pub fn count(&self) -> usize {
        self.plugins.len()
    }
}

impl Default for PluginRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::outcome::ProviderOutcome;
    use crate::schema::ConfigSchema;
    use crate::types::FlushParams;
    use crate::PluginCapabilities;

    struct StubPlugin {
        metadata: PluginMetadata,
    }

    impl StubPlugin {
        fn new(kind: ProviderKind) -> Self {
            Self {
                metadata: PluginMetadata {
                    name: kind.to_string(),
                    provider_type: kind,
                    version: "0.1.0".to_string(),
                    description: String::new(),
                    documentation_url: None,
                    zone_label: "Zone ID".to_string(),
                    config_schema: ConfigSchema::new(),
                    capabilities: PluginCapabilities {
                        zone: true,
                        ..Default::default()
                    },
                },
            }
        }
    }

    #[async_trait]
    impl Plugin for StubPlugin {
        fn metadata(&self) -> &PluginMetadata {
            &self.metadata
        }

        async fn flush_zone(&self, _params: &FlushParams) -> ProviderOutcome {
            ProviderOutcome::Success {
                body: serde_json::Value::Null,
            }
        }
    }

    #[test]
    fn test_registry_creation() {
        let registry = PluginRegistry::new();
        assert_eq!(registry.count(), 0);
    }

    #[test]
    fn test_registry_lookup_is_ordered_and_deduplicated() {
        let mut registry = PluginRegistry::new();
        registry.register(Box::new(StubPlugin::new(ProviderKind::Incapsula)));
        registry.register(Box::new(StubPlugin::new(ProviderKind::KeyCdn)));
        registry.register(Box::new(StubPlugin::new(ProviderKind::KeyCdn)));

        assert_eq!(registry.count(), 2);
        assert!(registry.get(ProviderKind::KeyCdn).is_some());
        assert!(registry.get(ProviderKind::Fastly).is_none());
        assert_eq!(
            registry
                .metadata()
                .iter()
                .map(|m| m.provider_type)
                .collect::<Vec<_>>(),
            vec![ProviderKind::KeyCdn, ProviderKind::Incapsula]
        );
    }

    #[tokio::test]
    async fn test_default_scopes_are_unsupported() {
        let plugin = StubPlugin::new(ProviderKind::Fasterize);
        let params = FlushParams::new(
            "42",
            crate::FlushScope::Urls(vec!["https://example.com/".to_string()]),
        );

        let outcome = plugin.flush(&params).await;
        assert_eq!(outcome.http_status(), 400);
        assert!(plugin.flush_zone(&params).await.is_success());
    }
}
