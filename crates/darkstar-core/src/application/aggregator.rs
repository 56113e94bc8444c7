use std::sync::Arc;
use std::time::Duration;

use darkstar_plugin_api::{
    classify,
    FlushParams,
    Plugin,
    PluginRegistry,
    ProviderKind,
    ProviderOutcome,
    RawOutcome,
};
use futures::future::join_all;

use crate::domain::{
    AggregateBody,
    AggregateResult,
    FlushRequest,
    AGGREGATE_ERROR_MESSAGE,
};

/// Flushes several providers at once and folds their outcomes into one
/// response.
///
/// Every provider is called concurrently and every call is awaited, so a
/// failing or slow provider never hides another one's outcome.
pub struct FanOutAggregator {
    registry: Arc<PluginRegistry>,
    provider_timeout: Option<Duration>,
}

impl FanOutAggregator {
    pub fn new(registry: Arc<PluginRegistry>) -> Self {
        Self {
            registry,
            provider_timeout: None,
        }
    }

    /// Bounds each provider call; an expired call becomes a transport failure
    pub fn with_provider_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.provider_timeout = timeout;
        self
    }

    pub fn registry(&self) -> &PluginRegistry {
        &self.registry
    }

    pub async fn flush(&self, request: FlushRequest) -> AggregateResult {
        let calls: Vec<_> = request
            .into_iter()
            .map(|(provider, params)| async move {
                let outcome = self.flush_one(provider, &params).await;
                (provider, outcome)
            })
            .collect();

        tracing::debug!(providers = calls.len(), "Fanning out cache flush");

        // join_all yields in submission order whatever the completion order
        let outcomes = join_all(calls).await;
        let result = resolve_status(outcomes);

        tracing::info!(
            status = result.http_status,
            providers = result.body.status.len(),
            "Aggregate flush settled"
        );

        result
    }

    /// Flushes a single provider with the same timeout and logging as a
    /// fan-out
    pub async fn flush_one(&self, provider: ProviderKind, params: &FlushParams) -> ProviderOutcome {
        let Some(plugin) = self.registry.get(provider) else {
            tracing::error!(%provider, "No plugin registered");
            return ProviderOutcome::TransportFailure {
                message: format!("No plugin registered for {provider}"),
            };
        };

        let outcome = match self.provider_timeout {
            Some(limit) => match tokio::time::timeout(limit, plugin.flush(params)).await {
                Ok(outcome) => outcome,
                Err(_) => classify(
                    provider,
                    RawOutcome::Transport {
                        message: format!("request timed out after {}s", limit.as_secs()),
                    },
                ),
            },
            None => plugin.flush(params).await,
        };

        match &outcome {
            ProviderOutcome::Success { .. } => {
                tracing::info!(%provider, scope = params.scope.name(), "Cache flushed");
            }
            ProviderOutcome::ClientError { status, .. } | ProviderOutcome::ServerError { status, .. } => {
                tracing::warn!(%provider, remote_status = status, "Provider rejected flush");
            }
            ProviderOutcome::TransportFailure { message } => {
                tracing::warn!(%provider, error = %message, "Provider unreachable");
            }
        }

        outcome
    }
}

/// Folds outcomes, given in request order, into the aggregate response.
///
/// Any client error makes the response a 400, even alongside server
/// errors; otherwise the first server-side failure sets it.
pub fn resolve_status(
    outcomes: impl IntoIterator<Item = (ProviderKind, ProviderOutcome)>,
) -> AggregateResult {
    let mut http_status = 200;
    let mut body = AggregateBody::default();

    for (provider, outcome) in outcomes {
        if !outcome.is_success() {
            body.message = Some(AGGREGATE_ERROR_MESSAGE.to_string());

            let status = outcome.http_status();
            if http_status == 200 || (http_status >= 500 && status < 500) {
                http_status = status;
            }
        }

        body.status.insert(provider, outcome.into_response());
    }

    AggregateResult { http_status, body }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use darkstar_plugin_api::{
        FlushScope,
        PluginCapabilities,
        PluginMetadata,
        ProviderResponse,
    };
    use serde_json::{
        json,
        Value,
    };

    use super::*;

    struct StubPlugin {
        metadata: PluginMetadata,
        outcome: ProviderOutcome,
        delay: Option<Duration>,
    }

    impl StubPlugin {
        fn new(provider: ProviderKind, outcome: ProviderOutcome) -> Self {
            Self {
                metadata: PluginMetadata {
                    name: provider.to_string(),
                    provider_type: provider,
                    version: "0.1.0".to_string(),
                    description: String::new(),
                    documentation_url: None,
                    zone_label: "zone".to_string(),
                    config_schema: Default::default(),
                    capabilities: PluginCapabilities {
                        zone: true,
                        urls: true,
                        directories: true,
                    },
                },
                outcome,
                delay: None,
            }
        }

        fn delayed(mut self, delay: Duration) -> Self {
            self.delay = Some(delay);
            self
        }
    }

    #[async_trait]
    impl Plugin for StubPlugin {
        fn metadata(&self) -> &PluginMetadata {
            &self.metadata
        }

        async fn flush_zone(&self, _params: &FlushParams) -> ProviderOutcome {
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            self.outcome.clone()
        }
    }

    fn success(body: Value) -> ProviderOutcome {
        ProviderOutcome::Success { body }
    }

    fn client_error(status: u16) -> ProviderOutcome {
        ProviderOutcome::ClientError {
            status,
            body: json!({ "status": "error", "description": "Unauthorized" }),
        }
    }

    fn server_error(status: u16) -> ProviderOutcome {
        ProviderOutcome::ServerError {
            status,
            body: json!("Service Unavailable"),
        }
    }

    fn connection_error(provider: ProviderKind) -> ProviderOutcome {
        classify(
            provider,
            RawOutcome::Transport {
                message: "connection error".to_string(),
            },
        )
    }

    fn aggregator(plugins: Vec<StubPlugin>) -> FanOutAggregator {
        let mut registry = PluginRegistry::new();
        for plugin in plugins {
            registry.register(Box::new(plugin));
        }
        FanOutAggregator::new(Arc::new(registry))
    }

    fn request(providers: &[ProviderKind]) -> FlushRequest {
        providers.iter().fold(FlushRequest::new(), |request, provider| {
            request.with(*provider, FlushParams::new("42", FlushScope::Zone))
        })
    }

    #[tokio::test]
    async fn test_single_provider_success() {
        let aggregator = aggregator(vec![StubPlugin::new(
            ProviderKind::Fasterize,
            success(json!({ "success": true })),
        )]);

        let result = aggregator.flush(request(&[ProviderKind::Fasterize])).await;

        assert_eq!(result.http_status, 200);
        assert_eq!(
            serde_json::to_value(&result.body).unwrap(),
            json!({
                "status": {
                    "fasterize": { "remoteStatusCode": 200, "remoteResponse": { "success": true } }
                }
            })
        );
    }

    #[tokio::test]
    async fn test_client_error_next_to_success() {
        let aggregator = aggregator(vec![
            StubPlugin::new(ProviderKind::KeyCdn, client_error(401)),
            StubPlugin::new(ProviderKind::Fastly, success(json!({ "status": "ok" }))),
        ]);

        let result = aggregator
            .flush(request(&[ProviderKind::KeyCdn, ProviderKind::Fastly]))
            .await;

        assert_eq!(result.http_status, 400);
        assert_eq!(result.body.message.as_deref(), Some(AGGREGATE_ERROR_MESSAGE));
        assert_eq!(
            result.body.status[&ProviderKind::KeyCdn].remote_status_code,
            Some(401)
        );
        assert_eq!(
            result.body.status[&ProviderKind::KeyCdn].message.as_deref(),
            Some("A remote error occurred")
        );
        assert_eq!(
            result.body.status[&ProviderKind::Fastly].remote_status_code,
            Some(200)
        );
    }

    #[tokio::test]
    async fn test_connection_error_is_bad_gateway() {
        let aggregator = aggregator(vec![StubPlugin::new(
            ProviderKind::KeyCdn,
            connection_error(ProviderKind::KeyCdn),
        )]);

        let result = aggregator.flush(request(&[ProviderKind::KeyCdn])).await;

        assert_eq!(result.http_status, 502);
        assert_eq!(
            result.body.status[&ProviderKind::KeyCdn],
            ProviderResponse {
                message: Some(
                    "An error occurred while accessing keycdn API: connection error".to_string()
                ),
                remote_status_code: None,
                remote_response: None,
            }
        );
    }

    #[tokio::test]
    async fn test_client_error_wins_over_transport_failure() {
        for order in [
            [ProviderKind::KeyCdn, ProviderKind::Fasterize],
            [ProviderKind::Fasterize, ProviderKind::KeyCdn],
        ] {
            let aggregator = aggregator(vec![
                StubPlugin::new(ProviderKind::KeyCdn, client_error(401)),
                StubPlugin::new(
                    ProviderKind::Fasterize,
                    connection_error(ProviderKind::Fasterize),
                ),
            ]);

            let result = aggregator.flush(request(&order)).await;

            assert_eq!(result.http_status, 400);
            assert_eq!(result.body.status.len(), 2);
        }
    }

    #[tokio::test]
    async fn test_server_errors_only_are_bad_gateway() {
        let aggregator = aggregator(vec![
            StubPlugin::new(ProviderKind::Fastly, server_error(503)),
            StubPlugin::new(ProviderKind::Incapsula, server_error(500)),
            StubPlugin::new(ProviderKind::KeyCdn, success(Value::Null)),
        ]);

        let result = aggregator
            .flush(request(&[
                ProviderKind::Fastly,
                ProviderKind::Incapsula,
                ProviderKind::KeyCdn,
            ]))
            .await;

        assert_eq!(result.http_status, 502);
        assert_eq!(
            result.body.status[&ProviderKind::Fastly].remote_status_code,
            Some(503)
        );
        assert_eq!(
            result.body.status[&ProviderKind::Incapsula].remote_status_code,
            Some(500)
        );
    }

    #[tokio::test]
    async fn test_status_follows_request_order() {
        let aggregator = aggregator(vec![
            StubPlugin::new(ProviderKind::KeyCdn, success(json!(1)))
                .delayed(Duration::from_millis(50)),
            StubPlugin::new(ProviderKind::Fastly, success(json!(2))),
            StubPlugin::new(ProviderKind::CloudFront, success(json!(3)))
                .delayed(Duration::from_millis(20)),
        ]);

        let result = aggregator
            .flush(request(&[
                ProviderKind::CloudFront,
                ProviderKind::KeyCdn,
                ProviderKind::Fastly,
            ]))
            .await;

        assert_eq!(
            result.body.status.keys().copied().collect::<Vec<_>>(),
            vec![
                ProviderKind::CloudFront,
                ProviderKind::KeyCdn,
                ProviderKind::Fastly
            ]
        );
        assert_eq!(
            serde_json::to_string(&result.body).unwrap(),
            r#"{"status":{"cloudfront":{"remoteStatusCode":200,"remoteResponse":3},"keycdn":{"remoteStatusCode":200,"remoteResponse":1},"fastly":{"remoteStatusCode":200,"remoteResponse":2}}}"#
        );
    }

    #[tokio::test]
    async fn test_identical_inputs_give_identical_results() {
        let aggregator = aggregator(vec![
            StubPlugin::new(ProviderKind::KeyCdn, client_error(403)),
            StubPlugin::new(ProviderKind::Fastly, server_error(502)),
            StubPlugin::new(ProviderKind::Fasterize, success(json!({ "success": true }))),
        ]);
        let providers = [
            ProviderKind::Fastly,
            ProviderKind::Fasterize,
            ProviderKind::KeyCdn,
        ];

        let first = aggregator.flush(request(&providers)).await;
        let second = aggregator.flush(request(&providers)).await;

        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_vec(&first.body).unwrap(),
            serde_json::to_vec(&second.body).unwrap()
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_hanging_provider_times_out_without_hiding_others() {
        let aggregator = aggregator(vec![
            StubPlugin::new(ProviderKind::Incapsula, success(Value::Null))
                .delayed(Duration::from_secs(3600)),
            StubPlugin::new(ProviderKind::Fastly, success(json!({ "status": "ok" }))),
        ])
        .with_provider_timeout(Some(Duration::from_secs(10)));

        let result = aggregator
            .flush(request(&[ProviderKind::Incapsula, ProviderKind::Fastly]))
            .await;

        assert_eq!(result.http_status, 502);
        assert_eq!(
            result.body.status[&ProviderKind::Incapsula].message.as_deref(),
            Some("An error occurred while accessing incapsula API: request timed out after 10s")
        );
        assert_eq!(
            result.body.status[&ProviderKind::Fastly].remote_status_code,
            Some(200)
        );
    }

    #[tokio::test]
    async fn test_unregistered_provider_is_reported() {
        let aggregator = aggregator(vec![StubPlugin::new(
            ProviderKind::Fastly,
            success(Value::Null),
        )]);

        let result = aggregator
            .flush(request(&[ProviderKind::Fastly, ProviderKind::CloudFront]))
            .await;

        assert_eq!(result.http_status, 502);
        assert_eq!(result.body.status.len(), 2);
        assert_eq!(
            result.body.status[&ProviderKind::CloudFront].message.as_deref(),
            Some("No plugin registered for cloudfront")
        );
    }

    #[test]
    fn test_resolve_status_tie_break() {
        let resolve = |outcomes: Vec<ProviderOutcome>| {
            resolve_status(ProviderKind::ALL.into_iter().zip(outcomes)).http_status
        };

        assert_eq!(resolve(vec![success(Value::Null), success(Value::Null)]), 200);
        assert_eq!(resolve(vec![server_error(503), client_error(401)]), 400);
        assert_eq!(resolve(vec![client_error(401), server_error(503)]), 400);
        assert_eq!(
            resolve(vec![
                connection_error(ProviderKind::KeyCdn),
                server_error(500)
            ]),
            502
        );
        assert_eq!(resolve(vec![]), 200);
    }

    #[test]
    fn test_resolve_status_keeps_every_provider() {
        let outcomes = vec![
            success(Value::Null),
            client_error(401),
            server_error(503),
            connection_error(ProviderKind::CloudFront),
            success(Value::Null),
        ];

        let result = resolve_status(ProviderKind::ALL.into_iter().zip(outcomes));

        assert_eq!(result.body.status.len(), 5);
        assert_eq!(result.body.message.as_deref(), Some(AGGREGATE_ERROR_MESSAGE));
    }

    #[test]
    fn test_all_success_has_no_message() {
        let result = resolve_status(vec![(ProviderKind::KeyCdn, success(json!({})))]);
        assert!(result.body.message.is_none());
        assert!(!serde_json::to_string(&result.body).unwrap().contains("message"));
    }
}
