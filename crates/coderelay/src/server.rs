use crate::config::UpstreamConfig;
use crate::prelude::{eprintln, *};
use crate::upstream::OllamaClient;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use coderelay_core::generate::{GenerationRequest, GenerationResult};
use coderelay_core::health::HealthStatus;
use coderelay_core::CodegenError;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

pub const GENERATE_ROUTE: &str = "/api/generate-code";
pub const HEALTH_ROUTE: &str = "/api/ollama-health";

#[derive(Debug, clap::Parser)]
#[command(name = "serve")]
#[command(about = "Serve the code generation and health endpoints over HTTP")]
pub struct App {
    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value = "3000")]
    pub port: u16,

    /// Host to bind to
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    pub host: String,
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    let config = UpstreamConfig::from_global(&global);
    let addr = format!("{}:{}", app.host, app.port);

    if global.verbose {
        eprintln!("Upstream: {} (default model {})", config.base_url, config.default_model);
        eprintln!("Generate endpoint: http://{}{}", addr, GENERATE_ROUTE);
        eprintln!("Health endpoint: http://{}{}", addr, HEALTH_ROUTE);
    }

    let client = Arc::new(OllamaClient::new(config)?);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| eyre!("Failed to bind to {}: {}", addr, e))?;

    log::info!("coderelay listening on http://{}", addr);

    axum::serve(listener, router(client))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| eyre!("Server error: {e}"))?;

    log::info!("coderelay stopped");

    Ok(())
}

/// Build the HTTP router around a shared upstream client.
pub fn router(client: Arc<OllamaClient>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(GENERATE_ROUTE, post(generate_handler))
        .route(HEALTH_ROUTE, get(health_handler))
        .layer(cors)
        .with_state(client)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    log::info!("Shutdown signal received");
}

async fn generate_handler(
    State(client): State<Arc<OllamaClient>>,
    payload: Result<Json<GenerationRequest>, JsonRejection>,
) -> Result<Json<GenerationResult>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        CodegenError::Validation(format!("Invalid request body: {}", rejection.body_text()))
    })?;

    log::info!(
        "POST {} language={} model={}",
        GENERATE_ROUTE,
        request.language,
        request.model.as_deref().unwrap_or("<default>")
    );

    let result = client.generate(&request).await.map_err(|e| {
        log::warn!("Code generation failed: {}", e);
        e
    })?;

    Ok(Json(result))
}

async fn health_handler(
    State(client): State<Arc<OllamaClient>>,
) -> (StatusCode, Json<HealthStatus>) {
    let status = crate::health::probe(&client).await;

    log::info!("GET {} connected={}", HEALTH_ROUTE, status.connected);

    let code =
        StatusCode::from_u16(status.http_status()).unwrap_or(StatusCode::SERVICE_UNAVAILABLE);
    (code, Json(status))
}
