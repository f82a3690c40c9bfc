// ============================================================
// Layer 1 - HTTP Presentation Layer
// ============================================================
// Serves the loaded model to a browser client:
//
//   POST /predict   {"N":..,"P":..,"K":..,"temperature":..,
//                    "humidity":..,"ph":..,"rainfall":..}
//                   → 200 {"crop": "<label>"}
//                   → 400 {"error": "..."}  bad input
//                   → 500 {"error": "..."}  model failure
//
//   GET  /health    → 200 {"status":"ok","trees":..,"labels":..}
//
// The model is loaded before the listener binds and is shared
// read-only by every handler through an Arc.
//
// Reference: axum and tower-http documentation

pub mod error;
pub mod handlers;

use anyhow::{Context, Result};
use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::domain::traits::CropRecommender;

/// Settings for `serve`.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub model_path:   PathBuf,
    pub host:         String,
    pub port:         u16,
    /// Allowed CORS origins; empty or "*" allows any origin
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            model_path:   PathBuf::from("crop_model.bin"),
            host:         "127.0.0.1".to_string(),
            port:         5000,
            cors_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// Bind the listener. `host` may be an IP literal or a name
    /// such as `localhost`, which is resolved here.
    pub async fn bind(&self) -> Result<TcpListener> {
        TcpListener::bind((self.host.as_str(), self.port))
            .await
            .with_context(|| format!("Cannot bind {}:{}", self.host, self.port))
    }
}

#[derive(Clone)]
pub struct ApiState {
    pub recommender: Arc<dyn CropRecommender>,
}

impl ApiState {
    pub fn new(recommender: Arc<dyn CropRecommender>) -> Self {
        Self { recommender }
    }
}

/// Fails when a CORS origin is not a valid header value.
pub fn router(state: ApiState, cors_origins: &[String]) -> Result<Router> {
    let trace = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Ok(Router::new()
        .route("/predict", post(handlers::predict))
        .route("/health", get(handlers::health))
        .with_state(state)
        .layer(cors_layer(cors_origins)?)
        .layer(trace))
}

/// Bind and serve until Ctrl-C.
pub async fn serve(cfg: &ServerConfig, state: ApiState) -> Result<()> {
    let app      = router(state, &cfg.cors_origins)?;
    let listener = cfg.bind().await?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Cannot listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}

fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let any = origins.is_empty() || origins.iter().any(|o| o.trim() == "*");

    let cors = if any {
        CorsLayer::new().allow_origin(Any)
    } else {
        let list = origins
            .iter()
            .map(|origin| {
                origin
                    .trim()
                    .parse::<HeaderValue>()
                    .with_context(|| format!("Invalid CORS origin '{origin}'"))
            })
            .collect::<Result<Vec<_>>>()?;
        CorsLayer::new().allow_origin(AllowOrigin::list(list))
    };

    Ok(cors
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]))
}
