use chrono::Utc;
use sea_orm::{
    ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
    sea_query::OnConflict,
};
use storefront_api::{
    config::AppConfig,
    db::{create_pool, orm_from_pool, run_migrations},
    entity::{
        Collections, Products,
        collections::{self, ActiveModel as CollectionActive},
        products::{self, ActiveModel as ProductActive},
    },
};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url, 2).await?;
    run_migrations(&pool).await?;
    let orm = orm_from_pool(pool);

    seed_collections(&orm).await?;
    seed_products(&orm).await?;

    println!("Seed completed for {}", config.site.base_url);
    Ok(())
}

async fn seed_collections(orm: &DatabaseConnection) -> anyhow::Result<()> {
    let collections = [
        ("Smartphones", Some("smartphones"), true),
        ("Laptops", Some("laptops"), true),
        ("Smart Watches", None, true),
        ("Legacy Accessories", None, false),
    ];

    for (name, slug, is_active) in collections {
        let active = CollectionActive {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            slug: Set(slug.map(str::to_string)),
            is_active: Set(is_active),
            created_at: NotSet,
            updated_at: Set(Some(Utc::now().fixed_offset())),
        };
        Collections::insert(active)
            .on_conflict(OnConflict::column(collections::Column::Name).do_nothing().to_owned())
            .do_nothing()
            .exec(orm)
            .await?;
    }

    println!("Seeded collections");
    Ok(())
}

async fn seed_products(orm: &DatabaseConnection) -> anyhow::Result<()> {
    let products = [
        ("iPhone 12 (Refurbished)", "Apple", "Smartphones", 3_499_900, Some(2_999_900), 5),
        ("Pixel 6a (Refurbished)", "Google", "Smartphones", 1_899_900, None, 0),
        ("ThinkPad T480 (Refurbished)", "Lenovo", "Laptops", 2_799_900, Some(2_499_900), 3),
        ("Galaxy Watch 4 (Refurbished)", "Samsung", "Smart Watches", 899_900, None, 12),
    ];

    for (name, product_type, collection, price, discount_price, stock) in products {
        let collection_id = Collections::find()
            .filter(collections::Column::Name.eq(collection))
            .one(orm)
            .await?
            .map(|c| c.id);

        let active = ProductActive {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            description: Set(Some(format!("Certified refurbished, {collection}"))),
            price: Set(price),
            discount_price: Set(discount_price),
            stock: Set(stock),
            image: Set(None),
            product_type: Set(Some(product_type.to_string())),
            condition: Set(Some("Refurbished Condition".to_string())),
            rating: Set(0.0),
            review_count: Set(0),
            collection_id: Set(collection_id),
            created_at: NotSet,
            updated_at: Set(Some(Utc::now().fixed_offset())),
        };
        Products::insert(active)
            .on_conflict(OnConflict::column(products::Column::Name).do_nothing().to_owned())
            .do_nothing()
            .exec(orm)
            .await?;
    }

    println!("Seeded products");
    Ok(())
}
