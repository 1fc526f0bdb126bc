//! Route definitions for the Axum server.

use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::http::HeaderValue;
use axum::routing::{delete, get, post};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::bootstrap::CorsConfig;
use crate::handlers;
use crate::listing;
use crate::state::{AppState, HubContext};

/// Build CORS layer from configuration.
fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    match config {
        CorsConfig::AllowAll => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
        CorsConfig::AllowOrigins(origins) => {
            let origins: Vec<HeaderValue> = origins
                .iter()
                .filter_map(|o| o.parse::<HeaderValue>().ok())
                .collect();
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        }
    }
}

/// Plain static file server over `root`.
///
/// Directories without an `index.html` are answered with a generated
/// listing.
pub fn create_static_router(root: impl AsRef<Path>) -> Router {
    let root = Arc::new(root.as_ref().to_path_buf());
    Router::new()
        .fallback_service(ServeDir::new(root.as_path()))
        .layer(middleware::from_fn_with_state(
            root,
            listing::directory_listing,
        ))
        .layer(TraceLayer::new_for_http())
}

/// Hub API routes (mounted under `/api`).
fn api_routes(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/info", get(handlers::info::get))
        .route("/files", get(handlers::files::list))
        .route("/files/{filename}", delete(handlers::files::remove))
        .route("/upload", post(handlers::files::upload))
        .route("/upload-multiple", post(handlers::files::upload_multiple))
        .route("/download/{filename}", get(handlers::files::download))
        .route("/download-all", get(handlers::files::download_all))
        .route("/chat/history", get(handlers::chat::history))
        .route("/chat/messages", post(handlers::chat::post))
        .route("/events", get(handlers::events::stream))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
}

/// Hub router: `/api/*`, `/health`, and the public directory for
/// everything else.
pub fn create_hub_router(
    ctx: HubContext,
    public_dir: impl AsRef<Path>,
    cors: &CorsConfig,
) -> Router {
    let max_upload_bytes = ctx.max_upload_bytes;
    let state: AppState = Arc::new(ctx);

    Router::new()
        .route("/health", get(health_check))
        .nest(
            "/api",
            api_routes(max_upload_bytes)
                .with_state(state)
                .layer(build_cors_layer(cors)),
        )
        .fallback_service(ServeDir::new(public_dir.as_ref()))
        .layer(TraceLayer::new_for_http())
}

/// Simple health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
