//! HTTP surface for the advice endpoints.
//!
//! Handlers are transport shims: they deserialize the request, call into
//! [`crate::analysis`], and serialize the result. Any handler error is
//! surfaced as a 500 carrying the error's message text.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::OnceLock;

use axum::{
    http::{
        header::{ACCEPT, CONTENT_TYPE},
        HeaderValue, Method, StatusCode,
    },
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use hyper::Error as HyperError;
use serde::Serialize;
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{fmt, EnvFilter};

use crate::analysis;
use crate::error::AnalysisError;
use crate::model::{AnalysisRequest, AnalysisResult, IndexRecommendation, PerformanceMetrics};

/// Service name reported by the metadata endpoints.
pub const SERVICE_NAME: &str = "DBOptima AI Service";

const VENDOR: &str = "King Group Of Technology";

/// Runtime options used to boot the advice HTTP server.
#[derive(Clone, Debug)]
pub struct ServerOptions {
    /// Network interface to bind to.
    pub host: IpAddr,
    /// Listening port.
    pub port: u16,
    /// Allowed CORS origins for browser clients.
    pub allow_origins: Vec<String>,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8000,
            allow_origins: Vec::new(),
        }
    }
}

impl ServerOptions {
    /// Convenience accessor for `(host, port)` tuples.
    pub fn socket_parts(&self) -> (IpAddr, u16) {
        (self.host, self.port)
    }
}

/// Errors that can occur while running the advice server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Binding the TCP listener failed.
    #[error("failed to bind listener: {0}")]
    Io(#[from] std::io::Error),
    /// HTTP server error bubbled up from Axum/Hyper.
    #[error("server error: {0}")]
    Http(#[from] HyperError),
}

/// Starts the advice server and runs until shutdown.
pub async fn serve(options: ServerOptions) -> Result<(), ServerError> {
    install_tracing_subscriber();

    let (host, port) = options.socket_parts();
    let app = build_router(&options.allow_origins);
    let addr = SocketAddr::from((host, port));
    let listener = TcpListener::bind(addr).await?;

    tracing::info!(%addr, "advice service listening");

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

/// Builds the route table; shared by [`serve`] and the HTTP tests.
pub fn build_router(allow_origins: &[String]) -> Router {
    let mut router = Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/analyze-query", post(analyze_handler))
        .route("/recommend-indexes", post(recommend_indexes_handler))
        .route("/estimate-performance", post(estimate_performance_handler));

    if let Some(layer) = build_cors_layer(allow_origins) {
        router = router.layer(layer);
    }

    router.layer(TraceLayer::new_for_http())
}

fn build_cors_layer(origins: &[String]) -> Option<CorsLayer> {
    if origins.is_empty() {
        return None;
    }

    let mut allowed = Vec::new();
    for origin in origins {
        let normalized = normalize_origin(origin);
        match normalized
            .as_deref()
            .and_then(|value| HeaderValue::from_str(value).ok())
        {
            Some(value) => allowed.push(value),
            None => {
                tracing::warn!(%origin, ?normalized, "ignoring invalid CORS origin");
            }
        }
    }

    if allowed.is_empty() {
        return None;
    }

    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(allowed))
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([ACCEPT, CONTENT_TYPE]),
    )
}

fn normalize_origin(origin: &str) -> Option<String> {
    let trimmed = origin.trim();
    if trimmed.is_empty() {
        return None;
    }
    let without_trailing_slash = trimmed.trim_end_matches('/');
    if without_trailing_slash.is_empty() {
        return None;
    }
    Some(without_trailing_slash.to_string())
}

async fn root_handler() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        service: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
        vendor: VENDOR,
    })
}

async fn health_handler() -> Result<Json<HealthStatus>, AppError> {
    Ok(Json(HealthStatus {
        status: "healthy",
        timestamp: analysis::current_timestamp()?,
        service: SERVICE_NAME,
    }))
}

async fn analyze_handler(
    Json(request): Json<AnalysisRequest>,
) -> Result<Json<AnalysisResult>, AppError> {
    Ok(Json(analysis::analyze(&request)?))
}

async fn recommend_indexes_handler(
    Json(request): Json<AnalysisRequest>,
) -> Json<Vec<IndexRecommendation>> {
    Json(analysis::recommend_indexes(&request.query))
}

async fn estimate_performance_handler(
    Json(request): Json<AnalysisRequest>,
) -> Json<PerformanceMetrics> {
    Json(analysis::estimate_performance(&request.query))
}

#[derive(Debug, Serialize)]
struct ServiceInfo {
    service: &'static str,
    version: &'static str,
    vendor: &'static str,
}

#[derive(Debug, Serialize)]
struct HealthStatus {
    status: &'static str,
    timestamp: String,
    service: &'static str,
}

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = axum::Json(ErrorPayload {
            message: self.to_string(),
        });
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

#[derive(Debug, Serialize)]
struct ErrorPayload {
    message: String,
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("shutdown signal received"),
        Err(err) => tracing::error!(?err, "failed to listen for shutdown signal"),
    }
}

fn install_tracing_subscriber() {
    static INSTALLED: OnceLock<()> = OnceLock::new();
    INSTALLED.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let _ = fmt().with_env_filter(filter).try_init();
    });
}
