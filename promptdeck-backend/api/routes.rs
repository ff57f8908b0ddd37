use axum::routing::get;
use axum::{Json, Router};
use hyper::header;
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};

use super::AppState;
use super::middleware;

pub fn build_router(state: AppState) -> Router {
    let health_routes = Router::new().route(
        "/",
        get(|| async {
            Json(json!({
                "status": "ok",
            }))
        }),
    );

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(vec![header::CONTENT_TYPE]);

    let static_dir = state.static_dir.clone();
    // The UI shell: `/` and unknown paths fall back to the sidebar page so the
    // `?q=` search URL always lands on it.
    let ui = ServeDir::new(&static_dir)
        .not_found_service(ServeFile::new(static_dir.join("index.html")));

    Router::new()
        .nest("/health", health_routes)
        .nest("/api", api_router())
        .route_service("/new", ServeFile::new(static_dir.join("new.html")))
        .fallback_service(ui)
        .with_state(state)
        .layer(cors)
        .layer(axum::middleware::from_fn(middleware::strip_trailing_slash))
}

fn api_router() -> Router<AppState> {
    Router::new().merge(super::prompts::router())
}
