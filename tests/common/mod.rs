#![allow(dead_code)]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response},
};
use sea_orm::DatabaseConnection;
use storefront_api::{config::SiteConfig, routes::create_router, state::AppState};
use tower::ServiceExt;

pub const SITE: &str = "https://shop.example.com";

pub fn app(orm: DatabaseConnection) -> Router {
    create_router().with_state(AppState::new(orm, SiteConfig::new(SITE)))
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
