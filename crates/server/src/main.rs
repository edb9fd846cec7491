use std::{net::SocketAddr, sync::Arc};

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use shared::{
    error::{ApiError, ErrorCode},
    protocol::{is_api_path, HealthResponse, CONTACT_ROUTE, HEALTH_ROUTE, SERVICES_ROUTE},
};
use tower::ServiceExt;
use tower_http::{
    limit::RequestBodyLimitLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use tracing::{error, info};

mod api;
mod app_state;
mod config;

use app_state::AppState;
use config::{load_settings, prepare_static_dir};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let settings = load_settings();
    let static_dir = prepare_static_dir(&settings.static_dir)?;
    let state = AppState::new(static_dir, &settings.spa_entry, api::default_services());
    if !state.spa_entry_path().is_file() {
        error!(
            entry = %state.spa_entry_path().display(),
            "SPA entry document is missing; page routes will answer 404"
        );
    }
    let app = build_router(Arc::new(state), settings.max_body_bytes);

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(%addr, static_dir = %settings.static_dir, "server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        error!(%error, "failed to listen for shutdown signal");
    }
    info!("shutting down");
}

fn build_router(state: Arc<AppState>, max_body_bytes: usize) -> Router {
    Router::new()
        .route(HEALTH_ROUTE, get(health))
        .route(CONTACT_ROUTE, post(api::submit_contact))
        .route(SERVICES_ROUTE, get(api::list_services))
        .fallback(serve_static)
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        timestamp: Utc::now(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
    })
}

/// Everything the API routes don't claim: unknown `/api/*` gets JSON, the
/// rest is a static asset or, failing that, the SPA entry document.
async fn serve_static(State(state): State<Arc<AppState>>, req: Request<Body>) -> Response {
    let path = req.uri().path();
    if is_api_path(path) {
        return api::not_found().await.into_response();
    }
    if is_traversal(path) {
        return StatusCode::BAD_REQUEST.into_response();
    }

    let assets = ServeDir::new(&state.static_dir)
        .append_index_html_on_directories(true)
        .fallback(ServeFile::new(state.spa_entry_path()));

    match assets.oneshot(req).await {
        Ok(res) => res.into_response(),
        Err(err) => {
            error!(%err, "static asset service failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiError::new(ErrorCode::Internal, "failed to serve asset")),
            )
                .into_response()
        }
    }
}

fn is_traversal(path: &str) -> bool {
    path.split('/').any(|segment| {
        let segment = segment.to_ascii_lowercase();
        segment == ".." || segment == "%2e%2e" || segment == ".%2e" || segment == "%2e."
    })
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
