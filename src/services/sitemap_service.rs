use chrono::{NaiveDate, Utc};
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, FromQueryResult, QueryFilter, QueryOrder,
    QuerySelect, prelude::DateTimeWithTimeZone,
};
use uuid::Uuid;

use crate::{
    config::SiteConfig,
    entity::{
        Collections, Products,
        collections::Column as CollectionColumn,
        products::Column as ProductColumn,
    },
    sitemap::{ChangeFrequency, Priority, SitemapEntry, SitemapError, UrlSet, collection_slug},
    state::AppState,
};

/// Marketing pages listed after the homepage, with their crawl priority.
pub const STATIC_PAGES: [(&str, f32); 7] = [
    ("/products", 0.9),
    ("/about", 0.8),
    ("/contact", 0.8),
    ("/sell", 0.8),
    ("/repair", 0.8),
    ("/recycle", 0.8),
    ("/business", 0.8),
];

const COLLECTION_PRIORITY: f32 = 0.8;
const PRODUCT_PRIORITY: f32 = 0.7;

#[derive(Debug, Clone, FromQueryResult)]
pub struct ProductStamp {
    pub id: Uuid,
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Debug, Clone, FromQueryResult)]
pub struct CollectionStamp {
    pub name: String,
    pub slug: Option<String>,
    pub updated_at: Option<DateTimeWithTimeZone>,
}

pub async fn generate_sitemap(state: &AppState) -> Result<UrlSet, SitemapError> {
    let today = Utc::now().date_naive();
    let (products, collections) = tokio::try_join!(
        in_stock_products(state.orm.as_ref()),
        active_collections(state.orm.as_ref())
    )?;
    tracing::debug!(
        products = products.len(),
        collections = collections.len(),
        "building sitemap"
    );
    Ok(build_url_set(&state.site, today, &collections, &products))
}

pub async fn in_stock_products(conn: &DatabaseConnection) -> Result<Vec<ProductStamp>, DbErr> {
    Products::find()
        .select_only()
        .column(ProductColumn::Id)
        .column(ProductColumn::UpdatedAt)
        .filter(ProductColumn::Stock.gt(0))
        .order_by_asc(ProductColumn::CreatedAt)
        .order_by_asc(ProductColumn::Id)
        .into_model::<ProductStamp>()
        .all(conn)
        .await
}

pub async fn active_collections(
    conn: &DatabaseConnection,
) -> Result<Vec<CollectionStamp>, DbErr> {
    Collections::find()
        .select_only()
        .column(CollectionColumn::Name)
        .column(CollectionColumn::Slug)
        .column(CollectionColumn::UpdatedAt)
        .filter(CollectionColumn::IsActive.eq(true))
        .order_by_asc(CollectionColumn::Name)
        .into_model::<CollectionStamp>()
        .all(conn)
        .await
}

/// Homepage, static pages, collections, then products.
pub fn build_url_set(
    site: &SiteConfig,
    today: NaiveDate,
    collections: &[CollectionStamp],
    products: &[ProductStamp],
) -> UrlSet {
    let mut set = UrlSet::new();

    set.push(SitemapEntry {
        url: site.url("/"),
        last_modified: today,
        change_frequency: ChangeFrequency::Daily,
        priority: Priority::new(1.0),
    });

    for (path, priority) in STATIC_PAGES {
        set.push(SitemapEntry {
            url: site.url(path),
            last_modified: today,
            change_frequency: ChangeFrequency::Weekly,
            priority: Priority::new(priority),
        });
    }

    for collection in collections {
        let slug = collection_slug(&collection.name, collection.slug.as_deref());
        set.push(SitemapEntry {
            url: site.url(&format!("/products/{slug}")),
            last_modified: date_or(collection.updated_at, today),
            change_frequency: ChangeFrequency::Weekly,
            priority: Priority::new(COLLECTION_PRIORITY),
        });
    }

    for product in products {
        set.push(SitemapEntry {
            url: site.url(&format!("/product/{}", product.id)),
            last_modified: date_or(product.updated_at, today),
            change_frequency: ChangeFrequency::Weekly,
            priority: Priority::new(PRODUCT_PRIORITY),
        });
    }

    set
}

fn date_or(stamp: Option<DateTimeWithTimeZone>, today: NaiveDate) -> NaiveDate {
    stamp
        .map(|at| at.with_timezone(&Utc).date_naive())
        .unwrap_or(today)
}
