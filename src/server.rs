use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::context::ContextSource;
use crate::error::ServerError;
use crate::handlers::{self, health};
use crate::protocol::{McpError, McpRequest, McpResponse};

/// MCP server exposing `GET /health` and `POST /mcp` over HTTP.
///
/// Built once at startup; holds only immutable configuration and the
/// context source, and is shared with handlers through `Arc`.
pub struct TelosServer {
    config: ServerConfig,
    source: ContextSource,
}

impl TelosServer {
    pub fn new(config: ServerConfig) -> Result<Self, ServerError> {
        let source = ContextSource::new(&config)?;
        Ok(Self { config, source })
    }

    /// Build the axum router for this server.
    pub fn router(self: Arc<Self>) -> Router {
        Router::new()
            .route("/health", get(health_handler))
            .route("/mcp", post(mcp_handler))
            .layer(TraceLayer::new_for_http())
            .with_state(self)
    }

    /// Bind the configured address and serve until Ctrl-C or SIGTERM.
    pub async fn run(self) -> Result<(), ServerError> {
        let addr = self.config.bind_address();
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: addr.clone(),
                source,
            })?;

        tracing::info!(%addr, repo = %self.config.telos_repo, "starting TELOS MCP server");

        axum::serve(listener, Arc::new(self).router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("TELOS MCP server shut down");
        Ok(())
    }
}

async fn health_handler() -> Json<health::HealthStatus> {
    Json(health::check())
}

/// Dropping this future on client disconnect also drops any in-flight
/// context fetch.
async fn mcp_handler(
    State(server): State<Arc<TelosServer>>,
    body: Result<Json<McpRequest>, JsonRejection>,
) -> (StatusCode, Json<McpResponse>) {
    let req = match body {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let status = rejection.status();
            let error = match rejection {
                JsonRejection::JsonSyntaxError(e) => McpError::parse_error(e.body_text()),
                other => McpError::invalid_request(other.body_text()),
            };
            tracing::debug!(%status, message = %error.message, "rejected /mcp body");
            return (status, Json(McpResponse::error(error)));
        }
    };

    tracing::debug!(method = %req.method, "mcp request");
    let resp = handlers::dispatch(req, &server.source).await;
    (StatusCode::OK, Json(resp))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
