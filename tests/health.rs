mod common;

use axum::http::StatusCode;
use sea_orm::{DatabaseBackend, MockDatabase};

#[tokio::test]
async fn health_check_returns_ok() {
    let orm = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let response = common::get(common::app(orm), "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value =
        serde_json::from_str(&common::body_string(response).await).expect("json body");
    assert_eq!(body["message"], "Health check");
    assert_eq!(body["data"]["status"], "ok");
    assert_eq!(body["meta"]["site"], common::SITE);
}
