//! HTTP server setup and request handling.
//!
//! # Responsibilities
//! - Create the Axum router with the resolver as the request-handling chain
//! - Wire up middleware (tracing, compression, CORS)
//! - Stream decided files with conditional/caching header support
//! - Serve over plain TCP or TLS
//!
//! # Design Decisions
//! - One fallback handler; the RouteResolver makes every routing decision
//! - Files stream through tower-http's ServeFile so conditional requests
//!   and range requests behave like any static file server
//! - Pass-through ends the pipeline as an empty 404: there is no next
//!   handler behind this one

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Router,
};
use axum_server::{tls_rustls::RustlsConfig, Handle};
use std::future::Future;
use std::path::Path;
use tokio::net::TcpListener;
use tower::util::ServiceExt;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    services::ServeFile,
    trace::TraceLayer,
};

use crate::config::{ServerConfig, SiteConfig};
use crate::http::accept::accepts_html;
use crate::routing::{MatchPathTable, RouteDecision, RouteResolver};

/// Application state injected into the handler.
#[derive(Clone)]
struct AppState {
    resolver: Arc<RouteResolver>,
    path_prefix: Arc<str>,
}

/// HTTP server for the built site.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server around a loaded match-path table.
    pub fn new(config: &ServerConfig, site: &SiteConfig, table: MatchPathTable) -> Self {
        let resolver = Arc::new(RouteResolver::new(config.static_root(), table));
        let path_prefix = if config.prefix_paths {
            normalize_prefix(&site.path_prefix)
        } else {
            String::new()
        };

        if !path_prefix.is_empty() {
            tracing::info!(prefix = %path_prefix, "Serving under path prefix");
        }

        let state = AppState {
            resolver,
            path_prefix: path_prefix.into(),
        };

        Self {
            router: Self::build_router(state),
        }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .fallback(resolve_request)
            .with_state(state)
            .layer(CompressionLayer::new())
            .layer(cors_layer())
            .layer(TraceLayer::new_for_http())
    }

    /// The assembled router, for in-process testing.
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Serve plain HTTP on an already-bound listener until `shutdown`
    /// resolves.
    pub async fn serve(
        self,
        listener: TcpListener,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> Result<(), std::io::Error> {
        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await?;
        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Serve HTTPS on `addr`. Shutdown is driven through `handle`.
    pub async fn serve_tls(
        self,
        addr: SocketAddr,
        tls: RustlsConfig,
        handle: Handle,
    ) -> Result<(), std::io::Error> {
        axum_server::bind_rustls(addr, tls)
            .handle(handle)
            .serve(self.router.into_make_service())
            .await?;
        tracing::info!("HTTPS server stopped");
        Ok(())
    }
}

/// Permissive CORS: any origin, with the request headers a static site's
/// assets are fetched with.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers([
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::RANGE,
            header::IF_MODIFIED_SINCE,
            header::IF_NONE_MATCH,
        ])
}

/// Fallback handler: every request lands here and the resolver decides.
async fn resolve_request(State(state): State<AppState>, request: Request) -> Response {
    let html_ok = accepts_html(request.headers());
    let path = request.uri().path().to_owned();

    let Some(site_path) = strip_prefix(&path, &state.path_prefix) else {
        tracing::debug!(path = %path, "Request outside the path prefix");
        return pass_through();
    };

    match state.resolver.resolve(site_path, html_ok) {
        RouteDecision::Static(file) => stream_file(&file, StatusCode::OK, request).await,
        RouteDecision::Fallback(file) => {
            tracing::debug!(path = %path, file = %file.display(), "Serving match-path fallback");
            stream_file(&file, StatusCode::OK, request).await
        }
        RouteDecision::NotFound(page) => {
            stream_file(&page, StatusCode::NOT_FOUND, request).await
        }
        RouteDecision::PassThrough => pass_through(),
    }
}

/// Stream a decided file, honoring conditional and range headers.
///
/// `status` replaces a plain 200 (the 404 page is real content served with
/// status 404); conditional responses such as 304 are left untouched.
async fn stream_file(file: &Path, status: StatusCode, request: Request) -> Response {
    let result: Result<_, Infallible> = ServeFile::new(file).oneshot(request).await;
    let mut response = match result {
        Ok(response) => response.into_response(),
        Err(infallible) => match infallible {},
    };
    if response.status() == StatusCode::OK && status != StatusCode::OK {
        *response.status_mut() = status;
    }
    response
}

/// Nothing left in the chain: an empty 404, no body written by this layer.
fn pass_through() -> Response {
    StatusCode::NOT_FOUND.into_response()
}

/// Strip the mount prefix, or None when the request is outside it.
fn strip_prefix<'a>(path: &'a str, prefix: &str) -> Option<&'a str> {
    if prefix.is_empty() {
        return Some(path);
    }
    let rest = path.strip_prefix(prefix)?;
    if rest.is_empty() {
        Some("/")
    } else if rest.starts_with('/') {
        Some(rest)
    } else {
        // "/blogfoo" is not under "/blog".
        None
    }
}

/// Normalize a configured prefix to "" or "/segment[/more]".
fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}
