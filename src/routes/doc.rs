use utoipa::{OpenApi, openapi::OpenApi as OpenApiSpec};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    models::Product,
    response::{ApiResponse, Meta},
    routes::{health, products, sitemap},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        sitemap::sitemap_xml,
        products::get_product,
        products::get_structured_data
    ),
    components(
        schemas(
            Product,
            Meta,
            health::HealthData,
            ApiResponse<Product>,
            ApiResponse<health::HealthData>
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "SEO", description = "Crawler-facing feeds"),
        (name = "Products", description = "Product endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
