//! HTTP client and API methods for Incapsula

use darkstar_plugin_api::RawOutcome;
use reqwest::header::ACCEPT;
use reqwest::Client;

pub(crate) const BASE_URL: &str = "https://my.incapsula.com";

const PURGE_PATH: &str = "/api/prov/v1/sites/cache/purge";

pub(crate) struct Credentials<'a> {
    pub api_id: &'a str,
    pub api_key: &'a str,
}

pub(crate) struct IncapsulaClient {
    client: Client,
    base_url: String,
}

impl IncapsulaClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn rebase(self, base_url: &str) -> Self {
        Self::new(self.client, base_url)
    }

    /// Purges the site cache; `pattern` narrows the purge to matching
    /// resources (a path, or `^path` for a prefix)
    pub async fn purge(
        &self, site_id: &str, pattern: Option<&str>, credentials: &Credentials<'_>,
    ) -> RawOutcome {
        let url = format!("{}{PURGE_PATH}", self.base_url);
        tracing::debug!(site_id, pattern, "Purging Incapsula site cache");

        let mut query = vec![
            ("api_id", credentials.api_id),
            ("api_key", credentials.api_key),
            ("site_id", site_id),
        ];
        if let Some(pattern) = pattern {
            query.push(("purge_pattern", pattern));
        }

        let result = self
            .client
            .post(&url)
            .header(ACCEPT, "application/json")
            .query(&query)
            .send()
            .await;

        RawOutcome::from_reqwest(result).await
    }
}
