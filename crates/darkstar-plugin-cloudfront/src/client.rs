//! AWS SDK client for CloudFront invalidations

use std::time::Duration;

use aws_sdk_cloudfront::config::retry::RetryConfig;
use aws_sdk_cloudfront::config::timeout::TimeoutConfig;
use aws_sdk_cloudfront::config::{
    BehaviorVersion,
    Credentials,
    Region,
};
use aws_sdk_cloudfront::error::{
    BuildError,
    DisplayErrorContext,
    ProvideErrorMetadata,
    SdkError,
};
use aws_sdk_cloudfront::operation::create_invalidation::CreateInvalidationOutput;
use aws_sdk_cloudfront::primitives::DateTime;
use aws_sdk_cloudfront::types::{
    InvalidationBatch,
    Paths,
};
use aws_sdk_cloudfront::{
    Client,
    Config,
};
use chrono::SecondsFormat;
use darkstar_plugin_api::RawOutcome;
use serde_json::{
    json,
    Value,
};

const REGION: &str = "eu-west-3";
const CREDENTIALS_PROVIDER: &str = "darkstar";
// CloudFront answers 201 Created to CreateInvalidation
const CREATED: u16 = 201;

pub(crate) struct AwsCredentials<'a> {
    pub access_key_id: &'a str,
    pub secret_access_key: &'a str,
}

pub(crate) struct CloudFrontClient {
    config: Config,
}

impl CloudFrontClient {
    pub fn new(timeout: Duration) -> Self {
        let config = Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(REGION))
            .retry_config(RetryConfig::disabled())
            .timeout_config(TimeoutConfig::builder().operation_timeout(timeout).build())
            .build();

        Self { config }
    }

    pub fn with_endpoint_url(self, endpoint_url: &str) -> Self {
        Self {
            config: self.config.to_builder().endpoint_url(endpoint_url).build(),
        }
    }

    /// Creates one invalidation for `paths`, signed with the caller's keys
    pub async fn create_invalidation(
        &self, distribution_id: &str, paths: &[String], credentials: &AwsCredentials<'_>,
    ) -> RawOutcome {
        let caller_reference = chrono::Utc::now().timestamp_millis().to_string();
        let batch = match invalidation_batch(paths, &caller_reference) {
            Ok(batch) => batch,
            Err(e) => {
                return RawOutcome::Transport {
                    message: e.to_string(),
                }
            }
        };

        let config = self
            .config
            .to_builder()
            .credentials_provider(Credentials::new(
                credentials.access_key_id,
                credentials.secret_access_key,
                None,
                None,
                CREDENTIALS_PROVIDER,
            ))
            .build();
        let client = Client::from_conf(config);

        tracing::debug!(
            distribution_id,
            count = paths.len(),
            "Creating CloudFront invalidation"
        );

        let result = client
            .create_invalidation()
            .distribution_id(distribution_id)
            .invalidation_batch(batch)
            .send()
            .await;

        match result {
            Ok(output) => RawOutcome::Response {
                status: CREATED,
                body: invalidation_body(&output, paths, &caller_reference),
            },
            Err(SdkError::ServiceError(context)) => {
                let status = context.raw().status().as_u16();
                let err = context.err();
                RawOutcome::Response {
                    status,
                    body: json!({ "code": err.code(), "message": err.message() }),
                }
            }
            Err(e) => RawOutcome::Transport {
                message: DisplayErrorContext(&e).to_string(),
            },
        }
    }
}

fn invalidation_batch(
    paths: &[String], caller_reference: &str,
) -> Result<InvalidationBatch, BuildError> {
    let paths = Paths::builder()
        .quantity(paths.len() as i32)
        .set_items(Some(paths.to_vec()))
        .build()?;

    InvalidationBatch::builder()
        .paths(paths)
        .caller_reference(caller_reference)
        .build()
}

/// JSON rendering of the created invalidation, shaped like CloudFront's
/// own API documents it
fn invalidation_body(
    output: &CreateInvalidationOutput, paths: &[String], caller_reference: &str,
) -> Value {
    let invalidation = output.invalidation().map(|invalidation| {
        json!({
            "Id": invalidation.id(),
            "Status": invalidation.status(),
            "CreateTime": format_time(invalidation.create_time()),
            "InvalidationBatch": {
                "Paths": { "Quantity": paths.len(), "Items": paths },
                "CallerReference": caller_reference,
            },
        })
    });

    json!({
        "Location": output.location(),
        "Invalidation": invalidation,
    })
}

fn format_time(time: &DateTime) -> Option<String> {
    chrono::DateTime::from_timestamp(time.secs(), time.subsec_nanos())
        .map(|time| time.to_rfc3339_opts(SecondsFormat::Millis, true))
}
