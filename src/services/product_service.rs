use chrono::Utc;
use sea_orm::EntityTrait;
use uuid::Uuid;

use crate::{
    entity::{
        Collections, Products, collections::Model as CollectionModel,
        products::Model as ProductModel,
    },
    error::{AppError, AppResult},
    models::Product,
    response::{ApiResponse, Meta},
    seo,
    sitemap::collection_slug,
    state::AppState,
};

pub async fn find_product(state: &AppState, id: Uuid) -> AppResult<Product> {
    let result = Products::find_by_id(id)
        .find_also_related(Collections)
        .one(state.orm.as_ref())
        .await?;
    match result {
        Some((product, collection)) => Ok(product_from_entity(product, collection)),
        None => Err(AppError::NotFound),
    }
}

pub async fn get_product(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Product>> {
    let product = find_product(state, id).await?;
    Ok(ApiResponse::success(
        "Product",
        product,
        Some(Meta::for_site(&state.site.base_url)),
    ))
}

pub async fn get_structured_data(state: &AppState, id: Uuid) -> AppResult<serde_json::Value> {
    let product = find_product(state, id).await?;
    Ok(seo::page_schema(&state.site, &product))
}

pub fn product_from_entity(model: ProductModel, collection: Option<CollectionModel>) -> Product {
    Product {
        id: model.id,
        name: model.name,
        description: model.description,
        price: model.price,
        discount_price: model.discount_price,
        stock: model.stock,
        image: model.image,
        product_type: model.product_type,
        condition: model.condition,
        rating: model.rating,
        review_count: model.review_count,
        collection_slug: collection
            .as_ref()
            .map(|c| collection_slug(&c.name, c.slug.as_deref())),
        collection: collection.map(|c| c.name),
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.map(|at| at.with_timezone(&Utc)),
    }
}
