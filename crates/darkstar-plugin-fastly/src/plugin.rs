//! Fastly plugin implementation

use async_trait::async_trait;
use darkstar_plugin_api::*;
use futures::future::join_all;

use crate::{
    client,
    metadata,
};

pub struct FastlyPlugin {
    metadata: PluginMetadata,
    client: client::FastlyClient,
}

impl FastlyPlugin {
    pub fn new(http_client: reqwest::Client) -> Self {
        Self {
            metadata: metadata::create_metadata(),
            client: client::FastlyClient::new(http_client, client::BASE_URL),
        }
    }

    /// Points the plugin at another API endpoint. URL purges are always
    /// sent to the URLs themselves.
    pub fn with_base_url(self, base_url: &str) -> Self {
        Self {
            client: self.client.rebase(base_url),
            ..self
        }
    }
}

#[async_trait]
impl Plugin for FastlyPlugin {
    fn metadata(&self) -> &PluginMetadata {
        &self.metadata
    }

    async fn flush_zone(&self, params: &FlushParams) -> ProviderOutcome {
        let token = match params.credential(metadata::AUTHORIZATION_TOKEN) {
            Ok(token) => token,
            Err(e) => return ProviderOutcome::rejected(&e),
        };

        let raw = self.client.purge_all(&params.zone_id, token).await;
        classify(ProviderKind::Fastly, raw)
    }

    async fn flush_urls(&self, params: &FlushParams, urls: &[String]) -> ProviderOutcome {
        let token = match params.credential(metadata::AUTHORIZATION_TOKEN) {
            Ok(token) => token,
            Err(e) => return ProviderOutcome::rejected(&e),
        };

        let purges = urls.iter().map(|url| async move {
            let raw = self.client.purge_url(url, token).await;
            classify(ProviderKind::Fastly, raw)
        });

        reduce_outcomes(join_all(purges).await)
    }
}
