//! HTTP client and API methods for Fasterize

use darkstar_plugin_api::RawOutcome;
use reqwest::header::{
    ACCEPT,
    AUTHORIZATION,
};
use reqwest::Client;

pub(crate) const BASE_URL: &str = "https://api.fasterize.com";

const BASE_PATH: &str = "/v1/configs";

pub(crate) struct FasterizeClient {
    client: Client,
    base_url: String,
}

impl FasterizeClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn rebase(self, base_url: &str) -> Self {
        Self::new(self.client, base_url)
    }

    /// Flushes the cache of a config; the token goes raw in `authorization`
    pub async fn flush_config(&self, config_id: &str, token: &str) -> RawOutcome {
        let url = format!("{}{BASE_PATH}/{config_id}/cache", self.base_url);
        tracing::debug!(config_id, "Flushing Fasterize config");

        let result = self
            .client
            .delete(&url)
            .header(ACCEPT, "application/json")
            .header(AUTHORIZATION, token)
            .send()
            .await;

        RawOutcome::from_reqwest(result).await
    }

    /// Flushes one URL of a config, named in the JSON body
    pub async fn flush_url(&self, config_id: &str, url: &str, token: &str) -> RawOutcome {
        let endpoint = format!("{}{BASE_PATH}/{config_id}/cache", self.base_url);
        tracing::debug!(config_id, url, "Flushing Fasterize URL");

        let result = self
            .client
            .delete(&endpoint)
            .header(ACCEPT, "application/json")
            .header(AUTHORIZATION, token)
            .json(&serde_json::json!({ "url": url }))
            .send()
            .await;

        RawOutcome::from_reqwest(result).await
    }
}
