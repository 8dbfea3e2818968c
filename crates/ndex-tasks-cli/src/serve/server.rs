//! Development server with live reload over Server-Sent Events.
//!
//! Two listeners: the file server on the main port serves built artifacts
//! from disk with no-cache headers and injects the reload client script
//! into HTML; the reload port carries the SSE channel and the client
//! script itself, so reload traffic never interferes with the served site.

use crate::error::{CliError, Result};
use crate::serve::{ReloadEvent, ReloadHub};
use axum::{
    body::Body,
    extract::State,
    http::{header, StatusCode, Uri},
    response::{sse::Event, sse::KeepAlive, IntoResponse, Response, Sse},
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio_stream::{wrappers::ReceiverStream, StreamExt};
use tower_http::cors::{Any, CorsLayer};

const RELOAD_SCRIPT: &str = include_str!("../../assets/reload-client.js");

/// Development server configuration.
#[derive(Debug, Clone)]
pub struct ServeConfig {
    /// Port for the file server
    pub port: u16,
    /// Port for the live-reload channel
    pub reload_port: u16,
    /// Directory the file server reads from
    pub dir: PathBuf,
}

impl ServeConfig {
    /// File server socket address (loopback only).
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from(([127, 0, 0, 1], self.port))
    }

    /// Live-reload socket address (loopback only).
    pub fn reload_addr(&self) -> SocketAddr {
        SocketAddr::from(([127, 0, 0, 1], self.reload_port))
    }

    /// The file server URL as a string.
    pub fn server_url(&self) -> String {
        format!("http://{}", self.addr())
    }
}

struct FileState {
    dir: PathBuf,
    reload_port: u16,
}

#[derive(Clone)]
struct ReloadState {
    hub: Arc<ReloadHub>,
    port: u16,
}

/// Development server.
pub struct DevServer {
    config: ServeConfig,
    hub: Arc<ReloadHub>,
}

impl DevServer {
    /// Create a new development server over a reload hub.
    pub fn new(config: ServeConfig, hub: Arc<ReloadHub>) -> Self {
        Self { config, hub }
    }

    /// Bind both listeners and run until either server fails.
    pub async fn start(self) -> Result<()> {
        let addr = self.config.addr();
        let reload_addr = self.config.reload_addr();
        let server_url = self.config.server_url();

        let file_app = Self::file_router(FileState {
            dir: self.config.dir.clone(),
            reload_port: self.config.reload_port,
        });
        let reload_app = Self::reload_router(ReloadState {
            hub: self.hub,
            port: self.config.reload_port,
        });

        let file_listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| CliError::Server(format!("Failed to bind to {}: {}", addr, e)))?;
        let reload_listener = tokio::net::TcpListener::bind(reload_addr)
            .await
            .map_err(|e| CliError::Server(format!("Failed to bind to {}: {}", reload_addr, e)))?;

        crate::ui::success(&format!(
            "Serving {} at {} (live reload on port {})",
            self.config.dir.display(),
            server_url,
            self.config.reload_port
        ));

        tokio::try_join!(
            async {
                axum::serve(file_listener, file_app)
                    .await
                    .map_err(|e| CliError::Server(format!("Server error: {}", e)))
            },
            async {
                axum::serve(reload_listener, reload_app)
                    .await
                    .map_err(|e| CliError::Server(format!("Live-reload server error: {}", e)))
            },
        )?;

        Ok(())
    }

    fn file_router(state: FileState) -> Router {
        Router::new()
            .fallback(get(serve_file))
            .layer(
                // Allow everything: this server only ever runs on loopback
                // during development.
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            )
            .with_state(Arc::new(state))
    }

    fn reload_router(state: ReloadState) -> Router {
        Router::new()
            .route("/livereload", get(handle_sse))
            .route("/livereload.js", get(handle_reload_script))
            .layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            )
            .with_state(state)
    }
}

/// Handle SSE connections for reload events.
async fn handle_sse(
    State(state): State<ReloadState>,
) -> Sse<impl tokio_stream::Stream<Item = Result<Event, std::convert::Infallible>>> {
    let (id, rx) = state.hub.register();

    tracing::debug!(id, "live-reload client connected");
    state.hub.broadcast(&ReloadEvent::ClientConnected { id }).await;

    let stream = ReceiverStream::new(rx).map(|data| Ok(Event::default().data(data)));

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(std::time::Duration::from_secs(15))
            .text("ping"),
    )
}

/// Serve the reload client script, templated with the reload port.
async fn handle_reload_script(State(state): State<ReloadState>) -> impl IntoResponse {
    let script = RELOAD_SCRIPT.replace("{{port}}", &state.port.to_string());

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/javascript")
        .header(header::CACHE_CONTROL, "no-cache")
        .body(Body::from(script))
        .unwrap()
}

/// Serve a built artifact from disk.
async fn serve_file(State(state): State<Arc<FileState>>, uri: Uri) -> Response {
    let path = uri.path().trim_start_matches('/');
    let rel = if path.is_empty() { "index.html" } else { path };

    // Never step outside the served directory.
    if rel.split('/').any(|segment| segment == "..") {
        return plain_response(StatusCode::FORBIDDEN, "Forbidden");
    }

    let file_path = state.dir.join(rel);
    if !file_path.is_file() {
        return plain_response(
            StatusCode::NOT_FOUND,
            &format!("File not found: {}", uri.path()),
        );
    }

    match tokio::fs::read(&file_path).await {
        Ok(content) => {
            let content_type = content_type_for(rel);
            let body = if content_type.starts_with("text/html") {
                inject_reload_script(&content, state.reload_port)
            } else {
                content
            };

            Response::builder()
                .status(StatusCode::OK)
                .header(header::CONTENT_TYPE, content_type)
                .header(header::CACHE_CONTROL, "no-cache")
                .body(Body::from(body))
                .unwrap()
        }
        Err(e) => plain_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            &format!("Failed to read {}: {}", file_path.display(), e),
        ),
    }
}

fn plain_response(status: StatusCode, message: &str) -> Response {
    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from(message.to_string()))
        .unwrap()
}

/// Inject the reload client script before the closing </body> tag, or
/// append it when no such tag exists.
fn inject_reload_script(content: &[u8], reload_port: u16) -> Vec<u8> {
    let html = String::from_utf8_lossy(content);
    let script_tag = format!(
        r#"<script src="http://127.0.0.1:{}/livereload.js"></script>"#,
        reload_port
    );

    if let Some(pos) = html.rfind("</body>") {
        let mut result = String::with_capacity(html.len() + script_tag.len() + 10);
        result.push_str(&html[..pos]);
        result.push_str("\n  ");
        result.push_str(&script_tag);
        result.push('\n');
        result.push_str(&html[pos..]);
        return result.into_bytes();
    }

    let mut result = html.to_string();
    result.push('\n');
    result.push_str(&script_tag);
    result.into_bytes()
}

/// Determine content type from file extension.
fn content_type_for(path: &str) -> &'static str {
    let extension = std::path::Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("");

    match extension {
        "js" | "mjs" => "application/javascript",
        "json" | "map" => "application/json",
        "html" => "text/html; charset=utf-8",
        "css" => "text/css",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "svg" => "image/svg+xml",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        _ => "application/octet-stream",
    }
}
