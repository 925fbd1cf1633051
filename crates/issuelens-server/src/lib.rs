// SPDX-License-Identifier: Apache-2.0

//! HTTP server exposing issuelens-core issue analysis.
//!
//! Two routes: `GET /` answers a health check and `POST /api/analyze_issue`
//! runs the analysis pipeline for `{repo_url, issue_number}`. Failures are
//! returned as `{"detail": "..."}` with status 400 or 500.

mod error;
mod routes;

use std::sync::Arc;

use anyhow::Context;
use issuelens_core::IssueAnalyzer;
use tokio::net::TcpListener;

pub use error::ApiError;
pub use routes::{AnalyzeRequest, HealthResponse, router};

/// Bind a listener on `host:port`.
///
/// `host` may be an IPv4 or IPv6 literal or a hostname such as `localhost`;
/// hostnames are resolved and the first address that binds is used.
pub async fn bind(host: &str, port: u16) -> std::io::Result<TcpListener> {
    TcpListener::bind((host, port)).await
}

/// Serve the router on an already bound listener until Ctrl+C, letting
/// in-flight requests finish before returning.
pub async fn serve(listener: TcpListener, analyzer: Arc<IssueAnalyzer>) -> anyhow::Result<()> {
    tracing::info!("HTTP server listening on {}", listener.local_addr()?);

    axum::serve(listener, router(analyzer))
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for Ctrl+C: {}", e);
                std::future::pending::<()>().await;
            }
            tracing::info!("Received Ctrl+C, shutting down gracefully");
        })
        .await?;

    Ok(())
}

/// Run the HTTP server.
///
/// Binds `host:port` and serves until Ctrl+C.
pub async fn run_http(analyzer: Arc<IssueAnalyzer>, host: &str, port: u16) -> anyhow::Result<()> {
    tracing::info!("Starting issuelens HTTP server on {}:{}", host, port);

    let listener = bind(host, port)
        .await
        .with_context(|| format!("Failed to bind {host}:{port}"))?;
    serve(listener, analyzer).await
}
