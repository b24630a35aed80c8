//! HTTP handlers.

use super::stream::{ndjson_response, EVENT_BUFFER};
use super::AppState;
use crate::events::ChannelProgressSink;
use axum::extract::State;
use axum::response::Response;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

/// Body of `POST /generate-gdd`.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateRequest {
    /// The idea to develop.
    #[serde(rename = "baseIdea")]
    pub base_idea: String,
}

/// Starts a run and streams its progress.
///
/// The run lives in its own task. If the client goes away the run still
/// finishes and its artifacts are still written.
pub async fn generate_gdd(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Response {
    let (sink, rx) = ChannelProgressSink::channel(EVENT_BUFFER);
    let orchestrator = state.orchestrator.clone();

    tokio::spawn(async move {
        info!(idea_len = request.base_idea.len(), "Starting GDD generation");
        if let Err(err) = orchestrator.run(&request.base_idea, &sink).await {
            error!(error = %err, "GDD generation failed");
        }
    });

    ndjson_response(rx)
}

/// Liveness payload.
#[derive(Debug, Serialize)]
pub struct Health {
    status: &'static str,
    version: &'static str,
}

/// `GET /health`.
pub async fn health() -> Json<Health> {
    Json(Health {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
