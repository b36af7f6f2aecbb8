//! Read-only HTTP view of the parameter store layer.
//!
//! `GET /env` returns the merged layer as a JSON object. The first request
//! on a cold process triggers the loader, so it may carry the load latency.

use std::collections::BTreeMap;
use std::net::SocketAddr;

use axum::{extract::State, http::StatusCode, response::Json, routing::get, Router};
use serde::Serialize;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::domain::errors::ConfigError;
use crate::domain::models::{ConfigValue, HttpConfig};
use crate::services::ConfigurationLoader;

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl From<ConfigError> for ErrorResponse {
    fn from(err: ConfigError) -> Self {
        Self {
            code: err.code().to_string(),
            error: err.to_string(),
        }
    }
}

/// Environment HTTP server.
pub struct EnvHttpServer {
    config: HttpConfig,
    loader: ConfigurationLoader,
}

impl EnvHttpServer {
    pub const fn new(loader: ConfigurationLoader, config: HttpConfig) -> Self {
        Self { config, loader }
    }

    /// Build the router.
    pub fn router(loader: ConfigurationLoader, enable_cors: bool) -> Router {
        let app = Router::new()
            .route("/env", get(get_env))
            .route("/health", get(health_check))
            .with_state(loader);

        if enable_cors {
            app.layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
                .layer(TraceLayer::new_for_http())
        } else {
            app.layer(TraceLayer::new_for_http())
        }
    }

    fn addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.config.host, self.config.port).parse()
    }

    /// Start the server.
    pub async fn serve(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let addr = self.addr()?;
        let router = Self::router(self.loader, self.config.enable_cors);

        tracing::info!("Env HTTP server listening on {}", addr);

        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, router).await?;
        Ok(())
    }

    /// Start the server with a shutdown signal.
    pub async fn serve_with_shutdown<F>(
        self,
        shutdown: F,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let addr = self.addr()?;
        let router = Self::router(self.loader, self.config.enable_cors);

        tracing::info!("Env HTTP server listening on {}", addr);

        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await?;
        Ok(())
    }
}

// Handler functions

async fn health_check() -> &'static str {
    "OK"
}

async fn get_env(
    State(loader): State<ConfigurationLoader>,
) -> Result<Json<BTreeMap<String, ConfigValue>>, (StatusCode, Json<ErrorResponse>)> {
    match loader.get_all().await {
        Ok(snapshot) => {
            let view = loader
                .registry()
                .layer(loader.layer_name())
                .unwrap_or_else(|| snapshot.entries().clone());
            Ok(Json(view))
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to serve environment layer");
            Err((StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse::from(e))))
        }
    }
}
