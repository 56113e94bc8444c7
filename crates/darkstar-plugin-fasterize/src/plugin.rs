//! Fasterize plugin implementation

use async_trait::async_trait;
use darkstar_plugin_api::*;
use futures::future::join_all;

use crate::{
    client,
    metadata,
};

pub struct FasterizePlugin {
    metadata: PluginMetadata,
    client: client::FasterizeClient,
}

impl FasterizePlugin {
    pub fn new(http_client: reqwest::Client) -> Self {
        Self {
            metadata: metadata::create_metadata(),
            client: client::FasterizeClient::new(http_client, client::BASE_URL),
        }
    }

    pub fn with_base_url(self, base_url: &str) -> Self {
        Self {
            client: self.client.rebase(base_url),
            ..self
        }
    }
}

#[async_trait]
impl Plugin for FasterizePlugin {
    fn metadata(&self) -> &PluginMetadata {
        &self.metadata
    }

    async fn flush_zone(&self, params: &FlushParams) -> ProviderOutcome {
        let token = match params.credential(metadata::AUTHORIZATION_TOKEN) {
            Ok(token) => token,
            Err(e) => return ProviderOutcome::rejected(&e),
        };

        let raw = self.client.flush_config(&params.zone_id, token).await;
        classify(ProviderKind::Fasterize, raw)
    }

    async fn flush_urls(&self, params: &FlushParams, urls: &[String]) -> ProviderOutcome {
        let token = match params.credential(metadata::AUTHORIZATION_TOKEN) {
            Ok(token) => token,
            Err(e) => return ProviderOutcome::rejected(&e),
        };

        let flushes = urls.iter().map(|url| async move {
            let raw = self.client.flush_url(&params.zone_id, url, token).await;
            classify(ProviderKind::Fasterize, raw)
        });

        reduce_outcomes(join_all(flushes).await)
    }
}
