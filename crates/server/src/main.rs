use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use shared::{
    domain::ProductType,
    error::ApiError,
    protocol::{RepositorySearchResponse, SearchQuery},
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod app_state;
mod config;
mod fixtures;

use app_state::AppState;
use config::load_settings;
use fixtures::{filter_repositories, load_repositories};

/// Lenient form of `NewProduct`: missing fields arrive as empty strings.
#[derive(Debug, Deserialize)]
struct CreateProductRequest {
    #[serde(default)]
    name: String,
    #[serde(default)]
    size: String,
    #[serde(rename = "type", default)]
    product_type: ProductType,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let settings = load_settings();
    let repositories = load_repositories(settings.fixtures_path.as_deref())?;
    info!(
        repositories = repositories.len(),
        fixtures = ?settings.fixtures_path,
        "fixtures loaded"
    );

    let app = build_router(Arc::new(AppState {
        repositories,
        product_failure_status: settings.product_failure_status,
    }));

    let addr: SocketAddr = settings
        .server_bind
        .parse()
        .with_context(|| format!("invalid bind address '{}'", settings.server_bind))?;
    info!(%addr, "server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/products", post(create_product))
        .route("/search/repositories", get(search_repositories))
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn create_product(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateProductRequest>,
) -> Result<StatusCode, (StatusCode, Json<ApiError>)> {
    if let Some(status) = state.product_failure_status {
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        warn!(%status, "answering product submission with configured failure");
        return Err((status, Json(ApiError::new("Configured failure"))));
    }

    let missing: Vec<&str> = [("name", &req.name), ("size", &req.size)]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(field, _)| field)
        .collect();
    if !missing.is_empty() {
        warn!(?missing, "rejecting incomplete product");
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiError::new(format!(
                "The form is invalid, the fields {} are required",
                missing.join(", ")
            ))),
        ));
    }

    info!(
        name = %req.name,
        size = %req.size,
        product_type = %req.product_type,
        "product stored"
    );
    Ok(StatusCode::CREATED)
}

async fn search_repositories(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Json<RepositorySearchResponse> {
    let items = filter_repositories(&state.repositories, query.q.as_deref());
    info!(query = ?query.q, results = items.len(), "repository search");
    Json(RepositorySearchResponse {
        total_count: items.len() as u64,
        items,
    })
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
