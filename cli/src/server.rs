//! HTTP server for fontload - a front desk for font errands (made by FontLab https://www.fontlab.com/)
//!
//! Server-rendered pages can ask here which stylesheet or `@font-face` block a
//! font configuration turns into, and write the answer straight into their
//! `<head>` without running any loader in the browser.

use anyhow::{Context, Result};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use tokio::net::TcpListener;

use fontload_core::{FontRequest, LoadPlan};

use crate::{provider_table, ProviderAliases};

/// A font configuration waiting to be turned into a plan.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct RenderRequest {
    /// Provider name or alias; detected from `config` when absent
    pub provider: Option<String>,
    /// The font configuration, exactly as a page would pass it
    pub config: FontRequest,
}

/// Open the doors and start answering font questions.
pub async fn serve(bind: &str) -> Result<()> {
    let listener = TcpListener::bind(bind)
        .await
        .with_context(|| format!("binding HTTP server to {bind}"))?;

    log::info!("serving load plans on {bind}");
    axum::serve(listener, router())
        .await
        .context("serving HTTP")?;
    Ok(())
}

/// Routing table: health check, provider aliases, and plan rendering.
pub fn router() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/providers", get(providers_handler))
        .route("/render", post(render_handler))
}

async fn providers_handler() -> Json<Vec<ProviderAliases>> {
    Json(provider_table())
}

async fn render_handler(
    Json(req): Json<RenderRequest>,
) -> Result<Json<LoadPlan>, (StatusCode, String)> {
    fontload_core::plan(req.provider.as_deref(), &req.config)
        .map(Json)
        .map_err(to_bad_request)
}

/// Turn a load error into a 400 carrying its message.
fn to_bad_request(err: impl std::fmt::Display) -> (StatusCode, String) {
    (StatusCode::BAD_REQUEST, err.to_string())
}
