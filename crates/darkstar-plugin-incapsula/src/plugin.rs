//! Incapsula plugin implementation

use async_trait::async_trait;
use darkstar_plugin_api::utils::path_and_query;
use darkstar_plugin_api::*;
use futures::future::join_all;

use crate::client::Credentials;
use crate::{
    client,
    metadata,
};

pub struct IncapsulaPlugin {
    metadata: PluginMetadata,
    client: client::IncapsulaClient,
}

impl IncapsulaPlugin {
    pub fn new(http_client: reqwest::Client) -> Self {
        Self {
            metadata: metadata::create_metadata(),
            client: client::IncapsulaClient::new(http_client, client::BASE_URL),
        }
    }

    pub fn with_base_url(self, base_url: &str) -> Self {
        Self {
            client: self.client.rebase(base_url),
            ..self
        }
    }

    /// Issues one purge per pattern, concurrently, and keeps the first
    /// failure in submission order
    async fn purge_patterns(
        &self, site_id: &str, patterns: Vec<String>, credentials: &Credentials<'_>,
    ) -> ProviderOutcome {
        let purges = patterns.iter().map(|pattern| async move {
            let raw = self
                .client
                .purge(site_id, Some(pattern.as_str()), credentials)
                .await;
            classify(ProviderKind::Incapsula, raw)
        });

        reduce_outcomes(join_all(purges).await)
    }
}

fn credentials(params: &FlushParams) -> PluginResult<Credentials<'_>> {
    Ok(Credentials {
        api_id: params.credential(metadata::API_ID)?,
        api_key: params.credential(metadata::API_KEY)?,
    })
}

/// Exact-path pattern for a URL
fn url_pattern(url: &str) -> PluginResult<String> {
    path_and_query(url)
}

/// Prefix pattern for a directory URL
fn directory_pattern(directory: &str) -> PluginResult<String> {
    Ok(format!("^{}", path_and_query(directory)?))
}

#[async_trait]
impl Plugin for IncapsulaPlugin {
    fn metadata(&self) -> &PluginMetadata {
        &self.metadata
    }

    async fn flush_zone(&self, params: &FlushParams) -> ProviderOutcome {
        let credentials = match credentials(params) {
            Ok(credentials) => credentials,
            Err(e) => return ProviderOutcome::rejected(&e),
        };

        let raw = self
            .client
            .purge(&params.zone_id, None, &credentials)
            .await;
        classify(ProviderKind::Incapsula, raw)
    }

    async fn flush_urls(&self, params: &FlushParams, urls: &[String]) -> ProviderOutcome {
        let prepared = credentials(params).and_then(|credentials| {
            let patterns = urls
                .iter()
                .map(|url| url_pattern(url))
                .collect::<PluginResult<Vec<_>>>()?;
            Ok((credentials, patterns))
        });

        match prepared {
            Ok((credentials, patterns)) => {
                self.purge_patterns(&params.zone_id, patterns, &credentials)
                    .await
            }
            Err(e) => ProviderOutcome::rejected(&e),
        }
    }

    async fn flush_directories(
        &self, params: &FlushParams, directories: &[String],
    ) -> ProviderOutcome {
        let prepared = credentials(params).and_then(|credentials| {
            let patterns = directories
                .iter()
                .map(|directory| directory_pattern(directory))
                .collect::<PluginResult<Vec<_>>>()?;
            Ok((credentials, patterns))
        });

        match prepared {
            Ok((credentials, patterns)) => {
                self.purge_patterns(&params.zone_id, patterns, &credentials)
                    .await
            }
            Err(e) => ProviderOutcome::rejected(&e),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{
        method,
        path,
        query_param,
        query_param_is_missing,
    };
    use wiremock::{
        Mock,
        MockServer,
        ResponseTemplate,
    };

    use super::*;

    const PURGE_PATH: &str = "/api/prov/v1/sites/cache/purge";

    fn params(scope: FlushScope) -> FlushParams {
        FlushParams::new("abcd", scope)
            .with_credential("incapsulaApiID", "1234")
            .with_credential("incapsulaApiKey", "4321")
    }

    fn ok_body() -> serde_json::Value {
        json!({ "res": 0, "res_message": "OK", "debug_info": { "id_info": "13007" } })
    }

    #[test]
    fn test_patterns() {
        assert_eq!(
            url_pattern("https://www.example.com/img/logo.png?v=1").unwrap(),
            "/img/logo.png?v=1"
        );
        assert_eq!(
            directory_pattern("https://www.example.com/assets/").unwrap(),
            "^/assets/"
        );
        assert!(url_pattern("not a url").is_err());
    }

    #[tokio::test]
    async fn test_flush_site() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(PURGE_PATH))
            .and(query_param("api_id", "1234"))
            .and(query_param("api_key", "4321"))
            .and(query_param("site_id", "abcd"))
            .and(query_param_is_missing("purge_pattern"))
            .respond_with(ResponseTemplate::new(200).set_body_json(ok_body()))
            .expect(1)
            .mount(&server)
            .await;

        let plugin = IncapsulaPlugin::new(reqwest::Client::new()).with_base_url(&server.uri());
        let outcome = plugin.flush(&params(FlushScope::Zone)).await;

        assert_eq!(outcome, ProviderOutcome::Success { body: ok_body() });
    }

    #[tokio::test]
    async fn test_flush_urls_one_purge_per_url() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(PURGE_PATH))
            .and(query_param("purge_pattern", "/a.css"))
            .respond_with(ResponseTemplate::new(200).set_body_json(ok_body()))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path(PURGE_PATH))
            .and(query_param("purge_pattern", "/b.js?v=3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(ok_body()))
            .expect(1)
            .mount(&server)
            .await;

        let plugin = IncapsulaPlugin::new(reqwest::Client::new()).with_base_url(&server.uri());
        let outcome = plugin
            .flush(&params(FlushScope::Urls(vec![
                "https://www.example.com/a.css".to_string(),
                "https://www.example.com/b.js?v=3".to_string(),
            ])))
            .await;

        assert!(outcome.is_success());
    }

    #[tokio::test]
    async fn test_flush_directories_uses_prefix_pattern() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(PURGE_PATH))
            .and(query_param("purge_pattern", "^/assets"))
            .respond_with(ResponseTemplate::new(200).set_body_json(ok_body()))
            .expect(1)
            .mount(&server)
            .await;

        let plugin = IncapsulaPlugin::new(reqwest::Client::new()).with_base_url(&server.uri());
        let outcome = plugin
            .flush(&params(FlushScope::Directories(vec![
                "https://www.example.com/assets".to_string(),
            ])))
            .await;

        assert!(outcome.is_success());
    }

    #[tokio::test]
    async fn test_forbidden_purge() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(PURGE_PATH))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "code": 9411,
                "message": "Authentication parameters missing or incorrect"
            })))
            .mount(&server)
            .await;

        let plugin = IncapsulaPlugin::new(reqwest::Client::new()).with_base_url(&server.uri());
        let outcome = plugin.flush(&params(FlushScope::Zone)).await;

        assert!(matches!(
            outcome,
            ProviderOutcome::ClientError { status: 403, .. }
        ));
    }

    #[tokio::test]
    async fn test_missing_api_key() {
        let params = FlushParams::new("abcd", FlushScope::Zone).with_credential("incapsulaApiID", "1");
        let plugin = IncapsulaPlugin::new(reqwest::Client::new()).with_base_url("http://127.0.0.1:1");

        let outcome = plugin.flush(&params).await;

        assert_eq!(
            outcome,
            ProviderOutcome::ClientError {
                status: 400,
                body: json!({ "message": "Missing credential: incapsulaApiKey" }),
            }
        );
    }
}
