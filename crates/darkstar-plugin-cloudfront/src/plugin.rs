//! CloudFront plugin implementation

use std::time::Duration;

use async_trait::async_trait;
use darkstar_plugin_api::*;

use crate::client::AwsCredentials;
use crate::{
    client,
    metadata,
    paths,
};

pub struct CloudFrontPlugin {
    metadata: PluginMetadata,
    client: client::CloudFrontClient,
}

impl CloudFrontPlugin {
    /// `timeout` bounds each CreateInvalidation call
    pub fn new(timeout: Duration) -> Self {
        Self {
            metadata: metadata::create_metadata(),
            client: client::CloudFrontClient::new(timeout),
        }
    }

    /// Sends requests to another endpoint instead of the AWS one
    pub fn with_endpoint_url(self, endpoint_url: &str) -> Self {
        Self {
            client: self.client.with_endpoint_url(endpoint_url),
            ..self
        }
    }

    async fn invalidate(
        &self, params: &FlushParams, paths: PluginResult<Vec<String>>,
    ) -> ProviderOutcome {
        let prepared = credentials(params).and_then(|credentials| Ok((credentials, paths?)));
        let (credentials, paths) = match prepared {
            Ok(prepared) => prepared,
            Err(e) => return ProviderOutcome::rejected(&e),
        };

        let raw = self
            .client
            .create_invalidation(&params.zone_id, &paths, &credentials)
            .await;
        classify(ProviderKind::CloudFront, raw)
    }
}

fn credentials(params: &FlushParams) -> PluginResult<AwsCredentials<'_>> {
    Ok(AwsCredentials {
        access_key_id: params.credential(metadata::ACCESS_KEY_ID)?,
        secret_access_key: params.credential(metadata::SECRET_ACCESS_KEY)?,
    })
}

#[async_trait]
impl Plugin for CloudFrontPlugin {
    fn metadata(&self) -> &PluginMetadata {
        &self.metadata
    }

    async fn flush_zone(&self, params: &FlushParams) -> ProviderOutcome {
        self.invalidate(params, Ok(paths::distribution_paths()))
            .await
    }

    async fn flush_urls(&self, params: &FlushParams, urls: &[String]) -> ProviderOutcome {
        self.invalidate(params, paths::url_paths(urls)).await
    }

    async fn flush_directories(
        &self, params: &FlushParams, directories: &[String],
    ) -> ProviderOutcome {
        self.invalidate(params, paths::directory_paths(directories))
            .await
    }
}
