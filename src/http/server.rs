//! HTTP server: API routes and the explorer pages

use super::handler;
use super::state::AppState;
use axum::body::Body;
use axum::extract::Request;
use axum::http::{header, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use rust_embed::RustEmbed;
use std::path::{Path, PathBuf};
use tower::ServiceExt;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::info;

#[derive(RustEmbed)]
#[folder = "src/http/static/"]
struct Assets;

fn content_type(path: &str) -> mime::Mime {
    match path.rsplit('.').next().unwrap_or_default() {
        "html" | "htm" => mime::TEXT_HTML_UTF_8,
        "css" => mime::TEXT_CSS_UTF_8,
        "js" => mime::APPLICATION_JAVASCRIPT_UTF_8,
        "json" => mime::APPLICATION_JSON,
        "svg" => mime::IMAGE_SVG,
        "png" => mime::IMAGE_PNG,
        "txt" => mime::TEXT_PLAIN_UTF_8,
        _ => mime::APPLICATION_OCTET_STREAM,
    }
}

/// Serve an embedded asset; unknown paths get `index.html`
async fn embedded_asset(uri: Uri) -> Response {
    let path = uri.path().trim_start_matches('/');
    let path = if path.is_empty() { "index.html" } else { path };

    let (path, file) = match Assets::get(path) {
        Some(file) => (path, file),
        None => match Assets::get("index.html") {
            Some(file) => ("index.html", file),
            None => return StatusCode::NOT_FOUND.into_response(),
        },
    };
    (
        [(header::CONTENT_TYPE, content_type(path).to_string())],
        Body::from(file.data.into_owned()),
    )
        .into_response()
}

/// Build the application router.
///
/// Unknown `/api/*` paths return a JSON 404; every other unknown path falls
/// back to `index.html`, from `static_dir` when given, else from the
/// embedded pages.
pub fn router(state: AppState, static_dir: Option<&Path>) -> Router {
    let api = Router::new()
        .route("/api/health", get(handler::health))
        .route("/api/network", get(handler::network))
        .route("/api/network/stats", get(handler::network_stats))
        .route("/api/network/filter", post(handler::filter_network))
        .route("/api/filters", get(handler::filters))
        .route("/api/search", get(handler::search))
        .route("/api/node/:id", get(handler::node))
        .route("/api/analysis/centrality", post(handler::centrality))
        .route("/api/analysis/communities", post(handler::communities))
        .route("/api/analysis/pathways", post(handler::pathways))
        .route("/api/reports/summary", get(handler::report))
        .route("/api/export", get(handler::export))
        .with_state(state);

    let static_dir = static_dir.map(Path::to_path_buf);
    api.fallback(move |req: Request| async move { fallback(req, static_dir.as_deref()).await })
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

async fn fallback(req: Request, static_dir: Option<&Path>) -> Response {
    if req.uri().path().starts_with("/api/") {
        return handler::api_not_found().await.into_response();
    }
    match static_dir {
        Some(dir) => {
            let serve_dir = ServeDir::new(dir).fallback(ServeFile::new(dir.join("index.html")));
            match serve_dir.oneshot(req).await {
                Ok(response) => response.into_response(),
                Err(never) => match never {},
            }
        }
        None => embedded_asset(req.uri().clone()).await,
    }
}

/// HTTP server for the network API
pub struct HttpServer {
    state: AppState,
    addr: String,
    static_dir: Option<PathBuf>,
}

impl HttpServer {
    /// Create a new HTTP server
    pub fn new(state: AppState, addr: impl Into<String>, static_dir: Option<PathBuf>) -> Self {
        Self {
            state,
            addr: addr.into(),
            static_dir,
        }
    }

    /// Bind and serve until Ctrl-C
    pub async fn start(self) -> std::io::Result<()> {
        let app = router(self.state, self.static_dir.as_deref());
        let listener = tokio::net::TcpListener::bind(&self.addr).await?;
        let local = listener.local_addr()?;

        info!("LinkUp backend API running on http://{}", local);
        info!("Network explorer: http://localhost:{}/pages/network_explorer.html", local.port());

        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                // A failed signal listener just means no graceful shutdown
                let _ = tokio::signal::ctrl_c().await;
                info!("Shutting down");
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type() {
        assert_eq!(content_type("pages/network_explorer.html"), mime::TEXT_HTML_UTF_8);
        assert_eq!(content_type("app.js"), mime::APPLICATION_JAVASCRIPT_UTF_8);
        assert_eq!(content_type("blob"), mime::APPLICATION_OCTET_STREAM);
    }

    #[test]
    fn test_pages_are_embedded() {
        assert!(Assets::get("index.html").is_some());
        assert!(Assets::get("pages/network_explorer.html").is_some());
    }
}
