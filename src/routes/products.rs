use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::Product,
    response::ApiResponse,
    services::product_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}", get(get_product))
        .route("/{id}/structured-data", get(get_structured_data))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Get product", body = ApiResponse<Product>),
        (status = 404, description = "Product not found"),
    ),
    tag = "Products"
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let resp = product_service::get_product(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}/structured-data",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "schema.org JSON-LD graph (organization, website, product, breadcrumb)", body = serde_json::Value, content_type = "application/ld+json"),
        (status = 404, description = "Product not found"),
    ),
    tag = "Products"
)]
pub async fn get_structured_data(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<([(axum::http::HeaderName, &'static str); 1], Json<serde_json::Value>)> {
    let schema = product_service::get_structured_data(&state, id).await?;
    Ok((
        [(axum::http::header::CONTENT_TYPE, "application/ld+json")],
        Json(schema),
    ))
}
