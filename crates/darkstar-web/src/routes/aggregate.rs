use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{
        IntoResponse,
        Response,
    },
    Json,
};
use darkstar_core::{
    validate_aggregate,
    ScopeKind,
};

use super::parse_payload;
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn flush_zones(State(state): State<AppState>, body: Bytes) -> ApiResult<Response> {
    flush(&state, ScopeKind::Zone, &body).await
}

pub async fn flush_urls(State(state): State<AppState>, body: Bytes) -> ApiResult<Response> {
    flush(&state, ScopeKind::Urls, &body).await
}

async fn flush(state: &AppState, kind: ScopeKind, body: &[u8]) -> ApiResult<Response> {
    let payload = parse_payload(body)?;
    let request = validate_aggregate(state.aggregator.registry(), kind, &payload)?;

    let result = state.aggregator.flush(request).await;
    let status = StatusCode::from_u16(result.http_status).unwrap_or(StatusCode::BAD_GATEWAY);

    Ok((status, Json(result.body)).into_response())
}
