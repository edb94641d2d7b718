//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the proxy routes
//! - Wire up middleware (timeout, request ID, optional access log)
//! - Bind server to listener
//! - Dispatch requests to the resolver and forward them upstream

use std::time::Duration;

use axum::{
    body::Body,
    extract::{Path, State},
    http::Request,
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use serde::Deserialize;
use tokio::net::TcpListener;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServerSettings;
use crate::http::forward::HttpForwarder;
use crate::http::request::forward_suffix;
use crate::lifecycle::ShutdownSignal;
use crate::routing::{Resolver, RouteError, RouteKey};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub resolver: Resolver,
    pub forwarder: HttpForwarder,
}

#[derive(Debug, Deserialize)]
struct RouteParams {
    path: String,
    version: String,
    service: String,
}

/// HTTP server for the proxy.
pub struct HttpServer {
    router: Router,
    settings: ServerSettings,
}

impl HttpServer {
    pub fn new(settings: &ServerSettings, resolver: Resolver) -> Self {
        let state = AppState {
            resolver,
            forwarder: HttpForwarder::new(),
        };
        Self {
            router: Self::build_router(settings, state),
            settings: settings.clone(),
        }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(settings: &ServerSettings, state: AppState) -> Router {
        let router = Router::new()
            .route("/{path}/{version}/{service}/{*suffix}", any(proxy_handler))
            .route("/{path}/{version}/{service}/", any(proxy_handler))
            .route("/{path}/{version}/{service}", any(proxy_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(settings.request_timeout_secs)))
            .layer(PropagateRequestIdLayer::x_request_id());

        let router = if settings.log {
            tracing::info!("Request logging enabled");
            router.layer(TraceLayer::new_for_http())
        } else {
            router
        };

        router.layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// The configured router, for serving without a listener.
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Serve on `listener` until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: ShutdownSignal,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(name = %self.settings.name, address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Main proxy handler.
/// Resolves the route key, picks a server, and forwards the request.
async fn proxy_handler(
    State(state): State<AppState>,
    Path(params): Path<RouteParams>,
    request: Request<Body>,
) -> Response {
    let key = RouteKey::new(params.path, params.version, params.service);
    let suffix = forward_suffix(request.uri());

    let resolution = match state.resolver.resolve(&key, &suffix) {
        Ok(resolution) => resolution,
        Err(e) => return e.into_response(),
    };

    tracing::info!(
        route = %key,
        method = %request.method(),
        target = %resolution.target,
        "Proxying request"
    );

    match state.forwarder.forward(&resolution.target, request).await {
        Ok(response) => response,
        Err(e) => {
            tracing::error!(route = %key, target = %resolution.target, error = %e, "Upstream error");
            RouteError::Forwarding(e.to_string()).into_response()
        }
    }
}
