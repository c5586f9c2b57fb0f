//! API server assembly and lifecycle.

use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use axum::Router;
use lustre_search::{create_search_index, SearchIndex};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::{AppConfig, ServerConfig};
use crate::routes;
use crate::state::AppState;
use crate::{Error, Result};

/// lustre API server.
pub struct Server {
    config: AppConfig,
    state: AppState,
}

impl Server {
    /// Create a server, opening the configured search index.
    pub async fn new(config: AppConfig) -> Result<Self> {
        let index = create_search_index(&config.search).await?;
        tracing::info!(backend = index.name(), "search index ready");
        Ok(Self::with_index(config, Arc::from(index)))
    }

    /// Create a server over an already-open index.
    pub fn with_index(config: AppConfig, index: Arc<dyn SearchIndex>) -> Self {
        let state = AppState::new(index, &config.search, &config.auth);
        Self { config, state }
    }

    /// The fully layered router.
    pub fn router(&self) -> Router {
        app(self.state.clone(), &self.config.server)
    }

    /// Bind and serve until Ctrl-C or SIGTERM.
    pub async fn serve(self) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(&self.config.server.bind)
            .await
            .map_err(|e| Error::Server(format!("failed to bind {}: {e}", self.config.server.bind)))?;

        tracing::info!("listening on http://{}", self.config.server.bind);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| Error::Server(e.to_string()))
    }
}

impl std::fmt::Debug for Server {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Server")
            .field("bind", &self.config.server.bind)
            .field("state", &self.state)
            .finish()
    }
}

/// Routes plus CORS, compression and request tracing.
pub fn app(state: AppState, server: &ServerConfig) -> Router {
    routes::router(state)
        .layer(cors_layer(&server.allowed_origins))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("ignoring invalid CORS origin {origin:?}: {e}");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to listen for SIGTERM: {e}");
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

    tracing::info!("shutting down gracefully");
}
