// SPDX-License-Identifier: Apache-2.0

//! Route handlers and request/response types.

use std::sync::Arc;

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::routing::{get, post};
use axum::{Json, Router};
use issuelens_core::{IssueAnalysis, IssueAnalyzer};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tracing::{info, instrument};

use crate::error::ApiError;

/// Body of `POST /api/analyze_issue`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AnalyzeRequest {
    /// Repository URL, e.g. `https://github.com/owner/repo`.
    pub repo_url: String,
    /// Issue number, 1 or greater.
    pub issue_number: i64,
}

/// Body of `GET /`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct HealthResponse {
    /// Always `"ok"`.
    pub status: String,
}

/// Builds the application router.
///
/// Cross-origin requests are allowed from any origin, method and header so a
/// browser frontend served elsewhere can call the API.
pub fn router(analyzer: Arc<IssueAnalyzer>) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/api/analyze_issue", post(analyze_issue))
        .layer(CorsLayer::permissive())
        .with_state(analyzer)
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

#[instrument(skip_all)]
async fn analyze_issue(
    State(analyzer): State<Arc<IssueAnalyzer>>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<IssueAnalysis>, ApiError> {
    let Json(request) = payload?;

    let issue_number = u64::try_from(request.issue_number)
        .ok()
        .filter(|n| *n >= 1)
        .ok_or_else(|| ApiError::bad_request("issue_number must be greater than or equal to 1"))?;

    info!(repo_url = %request.repo_url, issue_number, "Analyzing issue");
    let analysis = analyzer.analyze(&request.repo_url, issue_number).await?;
    Ok(Json(analysis))
}
