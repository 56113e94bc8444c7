use std::time::Duration;

use reqwest::Client;

use super::config::HttpSettings;

/// Builds the pooled client shared by every HTTP adapter
pub fn build_client(settings: &HttpSettings) -> reqwest::Result<Client> {
    tracing::debug!(
        timeout_secs = settings.timeout_secs,
        connect_timeout_secs = settings.connect_timeout_secs,
        pool_max_idle_per_host = settings.pool_max_idle_per_host,
        "Building HTTP client"
    );

    Client::builder()
        .use_rustls_tls()
        .pool_max_idle_per_host(settings.pool_max_idle_per_host)
        .pool_idle_timeout(Duration::from_secs(90))
        .tcp_keepalive(Duration::from_secs(60))
        .timeout(settings.timeout())
        .connect_timeout(settings.connect_timeout())
        .build()
}
