mod aggregate;
mod caches;
pub mod health;
mod plugins;

use axum::{
    routing::{
        delete,
        get,
    },
    Router,
};
use serde_json::Value;

use crate::error::{
    ApiResult,
    AppError,
};
use crate::state::AppState;

pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/heartbeat", get(health::heartbeat))
        .route("/v1/caches", get(plugins::list_plugins))
        .route("/v1/caches/zones", delete(aggregate::flush_zones))
        .route("/v1/caches/urls", delete(aggregate::flush_urls))
        .route(
            "/v1/caches/{provider}/zones/{zone_id}",
            delete(caches::flush_zone),
        )
        .route(
            "/v1/caches/{provider}/zones/{zone_id}/urls",
            delete(caches::flush_urls),
        )
        .route(
            "/v1/caches/{provider}/zones/{zone_id}/directories",
            delete(caches::flush_directories),
        )
        .fallback(|| async { AppError::NotFound })
}

/// An empty body is a missing payload, anything else must be JSON
fn parse_payload(body: &[u8]) -> ApiResult<Value> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }

    serde_json::from_slice(body).map_err(|e| {
        tracing::debug!(error = %e, "Malformed request payload");
        AppError::MalformedJson
    })
}
