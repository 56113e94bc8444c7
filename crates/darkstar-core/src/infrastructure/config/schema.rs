use std::net::SocketAddr;
use std::time::Duration;

use darkstar_plugin_api::ProviderKind;
use indexmap::IndexMap;
use serde::{
    Deserialize,
    Serialize,
};

pub(super) const DEFAULT_BIND_ADDR: &str = "0.0.0.0:9080";

pub(super) const DEFAULT_CORS_ALLOW_ALL: bool = true;

pub(super) const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub(super) const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

pub(super) const DEFAULT_POOL_MAX_IDLE_PER_HOST: usize = 10;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GatewayConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub http: HttpSettings,

    #[serde(default)]
    pub aggregator: AggregatorConfig,

    /// Endpoint overrides keyed by provider id
    #[serde(default)]
    pub providers: IndexMap<String, ProviderFileConfig>,
}

impl GatewayConfig {
    pub fn bind_addr(&self) -> Result<SocketAddr, String> {
        self.server
            .bind_addr
            .parse()
            .map_err(|e| format!("server.bind_addr '{}': {}", self.server.bind_addr, e))
    }

    /// Base URL override for a provider, if configured
    pub fn base_url(&self, provider: ProviderKind) -> Option<&str> {
        self.providers
            .get(provider.as_str())
            .and_then(|p| p.base_url.as_deref())
    }

    /// Every problem found, in file order
    pub fn validate(&self) -> Result<(), String> {
        let mut errors = Vec::new();

        if let Err(e) = self.bind_addr() {
            errors.push(e);
        }
        if let Err(e) = self.http.validate() {
            errors.push(e);
        }
        if self.aggregator.provider_timeout_secs == Some(0) {
            errors.push("aggregator.provider_timeout_secs must be greater than 0".to_string());
        }

        for (id, provider) in &self.providers {
            if id.parse::<ProviderKind>().is_err() {
                errors.push(format!("providers.{id}: unknown provider"));
                continue;
            }
            if let Some(base_url) = &provider.base_url {
                if let Err(e) = reqwest::Url::parse(base_url) {
                    errors.push(format!("providers.{id}.base_url '{base_url}': {e}"));
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors.join(", "))
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    #[serde(default = "default_cors_allow_all")]
    pub cors_allow_all: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            cors_allow_all: default_cors_allow_all(),
        }
    }
}

fn default_bind_addr() -> String {
    DEFAULT_BIND_ADDR.to_string()
}

fn default_cors_allow_all() -> bool {
    DEFAULT_CORS_ALLOW_ALL
}

/// Settings of the HTTP client shared by the vendor adapters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpSettings {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_pool_max_idle_per_host")]
    pub pool_max_idle_per_host: usize,
}

impl HttpSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.timeout_secs == 0 {
            return Err("http.timeout_secs must be greater than 0".to_string());
        }
        if self.connect_timeout_secs == 0 {
            return Err("http.connect_timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            pool_max_idle_per_host: default_pool_max_idle_per_host(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_connect_timeout_secs() -> u64 {
    DEFAULT_CONNECT_TIMEOUT_SECS
}

fn default_pool_max_idle_per_host() -> usize {
    DEFAULT_POOL_MAX_IDLE_PER_HOST
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AggregatorConfig {
    /// Upper bound for a single provider's flush; unbounded when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_timeout_secs: Option<u64>,
}

impl AggregatorConfig {
    pub fn provider_timeout(&self) -> Option<Duration> {
        self.provider_timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProviderFileConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}
