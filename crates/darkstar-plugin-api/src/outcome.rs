//! Normalized provider outcomes
//!
//! Every adapter funnels its vendor responses through [`classify`], so the
//! aggregator and the single-provider routes only ever see one of four
//! shapes whatever the vendor answered.

use serde::{
    Deserialize,
    Serialize,
};
use serde_json::Value;

use crate::error::PluginError;
use crate::types::{
    FlushScope,
    ProviderKind,
};

pub const REMOTE_ERROR_MESSAGE: &str = "A remote error occurred";

/// What came back from the wire before classification.
#[derive(Debug, Clone, PartialEq)]
pub enum RawOutcome {
    /// An HTTP response was received, whatever its status
    Response { status: u16, body: Value },
    /// No response at all: DNS, connect, TLS or timeout failure
    Transport { message: String },
}

impl RawOutcome {
    /// Reads a reqwest result into a raw outcome, consuming the body.
    pub async fn from_reqwest(result: Result<reqwest::Response, reqwest::Error>) -> Self {
        let response = match result {
            Ok(response) => response,
            Err(e) => {
                return Self::Transport {
                    message: e.to_string(),
                }
            }
        };

        let status = response.status().as_u16();
        match response.bytes().await {
            Ok(bytes) => Self::Response {
                status,
                body: parse_body(&bytes),
            },
            Err(e) => Self::Transport {
                message: e.to_string(),
            },
        }
    }
}

/// JSON when possible, the raw text otherwise, `null` for an empty body.
pub fn parse_body(bytes: &[u8]) -> Value {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Value::Null;
    }

    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProviderOutcome {
    Success { body: Value },
    ClientError { status: u16, body: Value },
    ServerError { status: u16, body: Value },
    TransportFailure { message: String },
}

impl ProviderOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Status the gateway answers with for this outcome alone.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::Success { .. } => 200,
            Self::ClientError { .. } => 400,
            Self::ServerError { .. } | Self::TransportFailure { .. } => 502,
        }
    }

    /// Returned by adapters asked for a scope they cannot flush.
    pub fn unsupported(provider: ProviderKind, scope: &FlushScope) -> Self {
        Self::ClientError {
            status: 400,
            body: serde_json::json!({
                "message": format!("{} flush is not supported by {provider}", scope.name()),
            }),
        }
    }

    /// Input the adapter could not turn into a vendor call.
    pub fn rejected(err: &PluginError) -> Self {
        Self::ClientError {
            status: 400,
            body: serde_json::json!({ "message": err.to_string() }),
        }
    }

    pub fn into_response(self) -> ProviderResponse {
        match self {
            Self::Success { body } => ProviderResponse {
                message: None,
                remote_status_code: Some(200),
                remote_response: Some(body),
            },
            Self::ClientError { status, body } | Self::ServerError { status, body } => {
                ProviderResponse {
                    message: Some(REMOTE_ERROR_MESSAGE.to_string()),
                    remote_status_code: Some(status),
                    remote_response: Some(body),
                }
            }
            Self::TransportFailure { message } => ProviderResponse {
                message: Some(message),
                remote_status_code: None,
                remote_response: None,
            },
        }
    }
}

/// Per-provider body, shared by the single-provider routes and the
/// `status` map of aggregate responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_status_code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_response: Option<Value>,
}

pub fn classify(provider: ProviderKind, raw: RawOutcome) -> ProviderOutcome {
    match raw {
        RawOutcome::Response { status, body } => match status {
            200..=299 => ProviderOutcome::Success { body },
            400..=499 => ProviderOutcome::ClientError { status, body },
            // 1xx and 3xx are as unusable as a 5xx from the gateway's side
            _ => ProviderOutcome::ServerError { status, body },
        },
        RawOutcome::Transport { message } => ProviderOutcome::TransportFailure {
            message: format!("An error occurred while accessing {provider} API: {message}"),
        },
    }
}

/// Folds the outcomes of one call per target into the provider's outcome.
///
/// Outcomes must be given in submission order. The first failure wins;
/// when everything succeeded the first success is kept.
pub fn reduce_outcomes(outcomes: impl IntoIterator<Item = ProviderOutcome>) -> ProviderOutcome {
    let mut first_success = None;

    for outcome in outcomes {
        if !outcome.is_success() {
            return outcome;
        }
        if first_success.is_none() {
            first_success = Some(outcome);
        }
    }

    first_success.unwrap_or(ProviderOutcome::Success { body: Value::Null })
}
