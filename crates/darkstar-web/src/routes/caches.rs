use axum::{
    body::Bytes,
    extract::{
        Path,
        State,
    },
    http::StatusCode,
    response::{
        IntoResponse,
        Response,
    },
    Json,
};
use darkstar_core::{
    validate_flush,
    ScopeKind,
};
use darkstar_plugin_api::ProviderKind;

use super::parse_payload;
use crate::error::{
    ApiResult,
    AppError,
};
use crate::state::AppState;

pub async fn flush_zone(
    State(state): State<AppState>, Path((provider, zone_id)): Path<(String, String)>, body: Bytes,
) -> ApiResult<Response> {
    flush(&state, &provider, &zone_id, ScopeKind::Zone, &body).await
}

pub async fn flush_urls(
    State(state): State<AppState>, Path((provider, zone_id)): Path<(String, String)>, body: Bytes,
) -> ApiResult<Response> {
    flush(&state, &provider, &zone_id, ScopeKind::Urls, &body).await
}

pub async fn flush_directories(
    State(state): State<AppState>, Path((provider, zone_id)): Path<(String, String)>, body: Bytes,
) -> ApiResult<Response> {
    flush(&state, &provider, &zone_id, ScopeKind::Directories, &body).await
}

/// Routes for unknown providers, or for a scope the provider cannot flush,
/// do not exist
async fn flush(
    state: &AppState, provider: &str, zone_id: &str, kind: ScopeKind, body: &[u8],
) -> ApiResult<Response> {
    let provider: ProviderKind = provider.parse().map_err(|_| AppError::NotFound)?;
    let plugin = state
        .aggregator
        .registry()
        .get(provider)
        .filter(|plugin| kind.supported_by(plugin.metadata()))
        .ok_or(AppError::NotFound)?;

    let payload = parse_payload(body)?;
    let params = validate_flush(plugin.metadata(), zone_id, kind, &payload)?;

    let outcome = state.aggregator.flush_one(provider, &params).await;
    let status = StatusCode::from_u16(outcome.http_status()).unwrap_or(StatusCode::BAD_GATEWAY);

    Ok((status, Json(outcome.into_response())).into_response())
}
