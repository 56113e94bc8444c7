use axum::{
    extract::State,
    Json,
};
use darkstar_plugin_api::PluginMetadata;

use crate::state::AppState;

/// Registered providers with their credential schema and capabilities
pub async fn list_plugins(State(state): State<AppState>) -> Json<Vec<PluginMetadata>> {
    Json(state.aggregator.registry().metadata())
}
