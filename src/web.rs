use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    Router,
    extract::{Query, State},
    response::Json,
    routing::get,
};
use serde::Deserialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::agent::TourismAgent;
use crate::models::QueryResult;

#[derive(Debug, Deserialize)]
pub struct QueryParams {
    pub q: String,
}

#[derive(Debug, Deserialize)]
pub struct QueryBody {
    pub query: String,
}

pub fn router(agent: Arc<TourismAgent>) -> Router {
    let api = Router::new()
        .route("/query", get(query_get).post(query_post))
        .route("/health", get(health))
        .with_state(agent);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

pub async fn run(agent: Arc<TourismAgent>, port: u16) -> Result<()> {
    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Web server running at http://localhost:{}", port);
    axum::serve(listener, router(agent))
        .await
        .context("Web server stopped unexpectedly")
}

async fn query_get(
    State(agent): State<Arc<TourismAgent>>,
    Query(params): Query<QueryParams>,
) -> Json<QueryResult> {
    Json(agent.process(&params.q).await)
}

async fn query_post(
    State(agent): State<Arc<TourismAgent>>,
    Json(body): Json<QueryBody>,
) -> Json<QueryResult> {
    Json(agent.process(&body.query).await)
}

async fn health() -> &'static str {
    "ok"
}
