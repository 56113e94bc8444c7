use async_trait::async_trait;
use serde::{
    Deserialize,
    Serialize,
};

use crate::outcome::ProviderOutcome;
use crate::schema::ConfigSchema;
use crate::types::{
    FlushParams,
    FlushScope,
    ProviderKind,
};

/// Plugin metadata - describes the plugin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginMetadata {
    /// Plugin name (e.g., "KeyCDN")
    pub name: String,
    /// Plugin identifier (e.g., "keycdn")
    pub provider_type: ProviderKind,
    /// Plugin version
    pub version: String,
    /// Plugin description
    pub description: String,
    /// Vendor API documentation
    pub documentation_url: Option<String>,
    /// Label of the zone id for this vendor (service, distribution, site...)
    pub zone_label: String,
    /// Credential fields expected in request payloads
    pub config_schema: ConfigSchema,
    /// Plugin capabilities
    pub capabilities: PluginCapabilities,
}

/// Plugin capabilities - which flush scopes the vendor supports
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct PluginCapabilities {
    /// Supports flushing a whole zone
    pub zone: bool,
    /// Supports flushing a list of URLs
    pub urls: bool,
    /// Supports flushing a list of directories
    pub directories: bool,
}

impl PluginCapabilities {
    pub fn supports(&self, scope: &FlushScope) -> bool {
        match scope {
            FlushScope::Zone => self.zone,
            FlushScope::Urls(_) => self.urls,
            FlushScope::Directories(_) => self.directories,
        }
    }
}

/// Main plugin trait - every CDN adapter implements this
///
/// Implementations must not fail for remote errors: whatever the vendor
/// answers, or when it does not answer, the result is a `ProviderOutcome`.
#[async_trait]
pub trait Plugin: Send + Sync {
    /// Get plugin metadata
    fn metadata(&self) -> &PluginMetadata;

    /// Flush everything cached for `params.zone_id`
    async fn flush_zone(&self, params: &FlushParams) -> ProviderOutcome;

    /// Flush specific URLs of a zone
    async fn flush_urls(&self, _params: &FlushParams, urls: &[String]) -> ProviderOutcome {
        ProviderOutcome::unsupported(self.provider_type(), &FlushScope::Urls(urls.to_vec()))
    }

    /// Flush everything below the given directory URLs
    async fn flush_directories(
        &self, _params: &FlushParams, directories: &[String],
    ) -> ProviderOutcome {
        ProviderOutcome::unsupported(
            self.provider_type(),
            &FlushScope::Directories(directories.to_vec()),
        )
    }

    /// Dispatch on the requested scope
    async fn flush(&self, params: &FlushParams) -> ProviderOutcome {
        match &params.scope {
            FlushScope::Zone => self.flush_zone(params).await,
            FlushScope::Urls(urls) => self.flush_urls(params, urls).await,
            FlushScope::Directories(directories) => {
                self.flush_directories(params, directories).await
            }
        }
    }

    /// Get the provider type
    fn provider_type(&self) -> ProviderKind {
        self.metadata().provider_type
    }

    fn capabilities(&self) -> PluginCapabilities {
        self.metadata().capabilities
    }
}
