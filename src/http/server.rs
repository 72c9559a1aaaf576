//! HTTP server setup and proxy handler.
//!
//! # Responsibilities
//! - Create Axum Router with the catch-all proxy handler
//! - Wire up middleware (tracing, timeout, request ID, optional HSTS)
//! - Build the transport chain (logging → caching → upstream)
//! - Turn inbound requests into outbound templates and copy responses back
//! - Degrade to 500 on transport or body-read failure without leaking
//!   internal error text to the client

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::{header::HeaderName, HeaderMap, Method, Request, Response, StatusCode, Uri},
    response::IntoResponse,
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::cache::LruCache;
use crate::config::ProxyConfig;
use crate::observability::metrics;
use crate::security::headers::hsts_layer;
use crate::transport::{
    CachingTransport, LoggedTransport, Transport, TransportError, UpstreamTransport,
};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub transport: Arc<dyn Transport>,
    pub max_body_bytes: usize,
}

/// HTTP server for the caching forward proxy.
pub struct ProxyServer {
    router: Router,
    cache: LruCache,
}

impl ProxyServer {
    /// Create a new proxy server with the given configuration.
    ///
    /// The cache store is constructed once here and shared by reference with
    /// the transport chain; it lives for the lifetime of the server.
    pub fn new(config: ProxyConfig) -> Self {
        let cache = LruCache::new(config.cache.capacity_bytes);

        let upstream: Arc<dyn Transport> = Arc::new(UpstreamTransport::new(&config.upstream));
        let caching: Arc<dyn Transport> = Arc::new(CachingTransport::new(upstream, cache.clone()));
        let transport: Arc<dyn Transport> = Arc::new(LoggedTransport::new(caching));

        let state = AppState {
            transport,
            max_body_bytes: config.upstream.max_body_bytes,
        };

        let router = Self::build_router(&config, state);
        Self { router, cache }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ProxyConfig, state: AppState) -> Router {
        let mut router = Router::new()
            .route("/{*path}", any(proxy_handler))
            .route("/", any(proxy_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(TraceLayer::new_for_http());

        if config.security.hsts {
            router = router.layer(hsts_layer());
        }

        router
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            cache_capacity_bytes = self.cache.capacity(),
            "Proxy server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Proxy server stopped");
        Ok(())
    }

    /// Get a handle to the shared response cache.
    pub fn cache(&self) -> &LruCache {
        &self.cache
    }
}

/// Main proxy handler.
///
/// Treats the inbound request as a template: the request target must be in
/// absolute-form (as forward-proxy clients send it), hop-by-hop headers are
/// stripped, and the body is fully buffered before the round-trip.
async fn proxy_handler(
    State(state): State<AppState>,
    request: Request<Body>,
) -> impl IntoResponse {
    let start_time = Instant::now();
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    let method = request.method().clone();
    let uri = request.uri().clone();
    let method_str = method.to_string();

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        uri = %uri,
        "Proxying request"
    );

    // A forward proxy needs the origin in the request target itself.
    if uri.scheme().is_none() || uri.authority().is_none() {
        tracing::warn!(
            request_id = %request_id,
            uri = %uri,
            "Request target is not absolute-form"
        );
        metrics::record_request(&method_str, 400, start_time);
        return StatusCode::BAD_REQUEST.into_response();
    }

    let (parts, body) = request.into_parts();
    let body_bytes = match axum::body::to_bytes(body, state.max_body_bytes).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(request_id = %request_id, error = %e, "Failed to read request body");
            metrics::record_request(&method_str, 400, start_time);
            return StatusCode::BAD_REQUEST.into_response();
        }
    };

    let mut outbound = Request::builder()
        .method(method.clone())
        .uri(uri.clone())
        .version(parts.version);
    if let Some(headers) = outbound.headers_mut() {
        for (name, value) in parts.headers.iter() {
            if !is_hop_by_hop(name) {
                headers.append(name.clone(), value.clone());
            }
        }
    }
    let outbound = match outbound.body(body_bytes) {
        Ok(request) => request,
        Err(e) => {
            tracing::error!(request_id = %request_id, error = %e, "Failed to build outbound request");
            metrics::record_request(&method_str, 500, start_time);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    match state.transport.round_trip(outbound).await {
        Ok(response) => {
            metrics::record_request(&method_str, response.status().as_u16(), start_time);

            // Status, headers, and body are copied back verbatim.
            let (response_parts, body) = response.into_parts();
            Response::from_parts(response_parts, Body::from(body)).into_response()
        }
        Err(e) => {
            match &e {
                TransportError::Body {
                    status,
                    headers: response_headers,
                    ..
                } => {
                    tracing::error!(
                        request_id = %request_id,
                        error = %e,
                        "Proxy could not read body of response"
                    );
                    tracing::error!(
                        request_id = %request_id,
                        request = %dump_request(&method, &uri, &parts.headers),
                        response = %dump_response(*status, response_headers),
                        "Exchange dump"
                    );
                }
                TransportError::Connect(_) => {
                    tracing::error!(request_id = %request_id, error = %e, "Proxy request failed");
                }
            }
            metrics::record_request(&method_str, 500, start_time);

            // Diagnostics go only to the log sink, never to the client.
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Headers that describe the connection, not the resource; never forwarded.
fn is_hop_by_hop(name: &HeaderName) -> bool {
    matches!(
        name.as_str(),
        "connection"
            | "keep-alive"
            | "proxy-connection"
            | "proxy-authenticate"
            | "proxy-authorization"
            | "te"
            | "trailer"
            | "transfer-encoding"
            | "upgrade"
    )
}

fn dump_request(method: &Method, uri: &Uri, headers: &HeaderMap) -> String {
    format!("{} {} headers={:?}", method, uri, headers)
}

fn dump_response(status: StatusCode, headers: &HeaderMap) -> String {
    format!("{} headers={:?}", status, headers)
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
