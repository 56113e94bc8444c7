//! KeyCDN plugin implementation

use async_trait::async_trait;
use darkstar_plugin_api::*;

use crate::{
    client,
    metadata,
};

pub struct KeyCdnPlugin {
    metadata: PluginMetadata,
    client: client::KeyCdnClient,
}

impl KeyCdnPlugin {
    pub fn new(http_client: reqwest::Client) -> Self {
        Self {
            metadata: metadata::create_metadata(),
            client: client::KeyCdnClient::new(http_client, client::BASE_URL),
        }
    }

    /// Points the plugin at another API endpoint
    pub fn with_base_url(self, base_url: &str) -> Self {
        Self {
            client: self.client.rebase(base_url),
            ..self
        }
    }
}

#[async_trait]
impl Plugin for KeyCdnPlugin {
    fn metadata(&self) -> &PluginMetadata {
        &self.metadata
    }

    async fn flush_zone(&self, params: &FlushParams) -> ProviderOutcome {
        let api_key = match params.credential(metadata::AUTHORIZATION_TOKEN) {
            Ok(api_key) => api_key,
            Err(e) => return ProviderOutcome::rejected(&e),
        };

        let raw = self.client.purge_zone(&params.zone_id, api_key).await;
        classify(ProviderKind::KeyCdn, raw)
    }

    async fn flush_urls(&self, params: &FlushParams, urls: &[String]) -> ProviderOutcome {
        let api_key = match params.credential(metadata::AUTHORIZATION_TOKEN) {
            Ok(api_key) => api_key,
            Err(e) => return ProviderOutcome::rejected(&e),
        };

        let raw = self.client.purge_urls(&params.zone_id, urls, api_key).await;
        classify(ProviderKind::KeyCdn, raw)
    }
}
