//! HTTP client and API methods for Fastly

use darkstar_plugin_api::RawOutcome;
use reqwest::header::ACCEPT;
use reqwest::{
    Client,
    Method,
};

pub(crate) const BASE_URL: &str = "https://api.fastly.com";

const FASTLY_KEY: &str = "Fastly-Key";

pub(crate) struct FastlyClient {
    client: Client,
    base_url: String,
}

impl FastlyClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn rebase(self, base_url: &str) -> Self {
        Self::new(self.client, base_url)
    }

    /// Purges everything cached for a service
    pub async fn purge_all(&self, service_id: &str, token: &str) -> RawOutcome {
        let url = format!("{}/service/{service_id}/purge_all", self.base_url);
        tracing::debug!(service_id, "Purging Fastly service");

        let result = self
            .client
            .post(&url)
            .header(ACCEPT, "application/json")
            .header(FASTLY_KEY, token)
            .send()
            .await;

        RawOutcome::from_reqwest(result).await
    }

    /// Purges one URL by sending it a `PURGE` request
    pub async fn purge_url(&self, url: &str, token: &str) -> RawOutcome {
        tracing::debug!(url, "Purging Fastly URL");

        let purge = match Method::from_bytes(b"PURGE") {
            Ok(method) => method,
            Err(e) => {
                return RawOutcome::Transport {
                    message: e.to_string(),
                }
            }
        };

        let result = self
            .client
            .request(purge, url)
            .header(ACCEPT, "application/json")
            .header(FASTLY_KEY, token)
            .send()
            .await;

        RawOutcome::from_reqwest(result).await
    }
}
