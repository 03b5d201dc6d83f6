use axum::{Router, routing::get};

use crate::state::AppState;

pub mod doc;
pub mod health;
pub mod products;
pub mod sitemap;

// Routes without bound state; the caller provides `AppState` and the middleware stack.
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/sitemap.xml", get(sitemap::sitemap_xml))
        .nest("/api", create_api_router())
        .merge(doc::scalar_docs())
}

pub fn create_api_router() -> Router<AppState> {
    Router::new().nest("/products", products::router())
}
