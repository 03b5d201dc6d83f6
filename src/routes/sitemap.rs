use axum::{
    extract::State,
    http::{HeaderName, header},
};

use crate::{services::sitemap_service, sitemap::SitemapError, state::AppState};

#[utoipa::path(
    get,
    path = "/sitemap.xml",
    responses(
        (status = 200, description = "Sitemap of every public storefront URL", body = String, content_type = "text/xml"),
        (status = 500, description = "Error generating sitemap", body = String, content_type = "text/plain"),
    ),
    tag = "SEO"
)]
pub async fn sitemap_xml(
    State(state): State<AppState>,
) -> Result<([(HeaderName, &'static str); 1], String), SitemapError> {
    let urlset = sitemap_service::generate_sitemap(&state).await?;
    let body = urlset.to_xml()?;
    tracing::info!(urls = urlset.len(), "sitemap generated");
    Ok(([(header::CONTENT_TYPE, "text/xml")], body))
}
