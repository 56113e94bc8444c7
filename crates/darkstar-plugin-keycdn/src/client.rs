//! HTTP client and API methods for KeyCDN

use darkstar_plugin_api::RawOutcome;
use reqwest::header::ACCEPT;
use reqwest::Client;

pub(crate) const BASE_URL: &str = "https://api.keycdn.com";

pub(crate) struct KeyCdnClient {
    client: Client,
    base_url: String,
}

impl KeyCdnClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn rebase(self, base_url: &str) -> Self {
        Self::new(self.client, base_url)
    }

    /// Purges every cached object of a zone
    pub async fn purge_zone(&self, zone_id: &str, api_key: &str) -> RawOutcome {
        let url = format!("{}/zones/purge/{zone_id}.json", self.base_url);
        tracing::debug!(zone_id, "Purging KeyCDN zone");

        let result = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .basic_auth(api_key, Some(""))
            .send()
            .await;

        RawOutcome::from_reqwest(result).await
    }

    /// Purges a list of URLs in one request
    pub async fn purge_urls(&self, zone_id: &str, urls: &[String], api_key: &str) -> RawOutcome {
        let url = format!("{}/zones/purgeurl/{zone_id}.json", self.base_url);
        tracing::debug!(zone_id, count = urls.len(), "Purging KeyCDN URLs");

        let result = self
            .client
            .delete(&url)
            .header(ACCEPT, "application/json")
            .basic_auth(api_key, Some(""))
            .json(&serde_json::json!({ "urls": urls }))
            .send()
            .await;

        RawOutcome::from_reqwest(result).await
    }
}
