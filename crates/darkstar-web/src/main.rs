mod error;
mod routes;
mod state;

use anyhow::Context;
use axum::Router;
use darkstar_core::{
    ConfigLoader,
    CoreContext,
};
use tower_http::cors::{
    Any,
    CorsLayer,
};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

fn build_app(state: AppState, cors_allow_all: bool) -> Router {
    routes::api_router()
        .layer(TraceLayer::new_for_http())
        .layer(if cors_allow_all {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            CorsLayer::new()
        })
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    darkstar_core::logging::init();

    tracing::info!("Starting Darkstar gateway");

    let config = ConfigLoader::load_default().context("Failed to load config")?;
    let bind_addr = config.bind_addr().map_err(anyhow::Error::msg)?;
    let cors_allow_all = config.server.cors_allow_all;

    let core = CoreContext::new(config).context("Failed to build HTTP client")?;
    let app = build_app(AppState::new(&core), cors_allow_all);

    tracing::info!("Listening on {}", bind_addr);
    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("Failed to bind {bind_addr}"))?;
    axum::serve(listener, app).await?;

    Ok(())
}
