use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{
    Deserialize,
    Serialize,
};

use crate::error::PluginError;

/// Every CDN/WAF vendor the gateway knows how to flush.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    KeyCdn,
    Fastly,
    Fasterize,
    CloudFront,
    Incapsula,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 5] = [
        ProviderKind::KeyCdn,
        ProviderKind::Fastly,
        ProviderKind::Fasterize,
        ProviderKind::CloudFront,
        ProviderKind::Incapsula,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::KeyCdn => "keycdn",
            Self::Fastly => "fastly",
            Self::Fasterize => "fasterize",
            Self::CloudFront => "cloudfront",
            Self::Incapsula => "incapsula",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = PluginError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| PluginError::UnknownProvider(s.to_string()))
    }
}

/// What part of a zone gets invalidated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlushScope {
    /// Everything cached for the zone
    Zone,
    /// Individual http/https URLs
    Urls(Vec<String>),
    /// Every object below each directory URL
    Directories(Vec<String>),
}

impl FlushScope {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Zone => "zone",
            Self::Urls(_) => "urls",
            Self::Directories(_) => "directories",
        }
    }
}

/// Validated parameters for one provider's flush.
#[derive(Debug, Clone)]
pub struct FlushParams {
    /// Zone, service, config, distribution or site id, depending on the vendor
    pub zone_id: String,
    /// Credential fields keyed as in the plugin's `ConfigSchema`
    pub credentials: HashMap<String, String>,
    pub scope: FlushScope,
}

impl FlushParams {
    pub fn new(zone_id: impl Into<String>, scope: FlushScope) -> Self {
        Self {
            zone_id: zone_id.into(),
            credentials: HashMap::new(),
            scope,
        }
    }

    pub fn with_credential(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.credentials.insert(key.into(), value.into());
        self
    }

    /// Looks up a credential the validator already guaranteed.
    pub fn credential(&self, key: &str) -> Result<&str, PluginError> {
        self.credentials
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| PluginError::MissingCredential(key.to_string()))
    }
}
