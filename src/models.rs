use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Storefront view of a product. Prices are in minor currency units (paise).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: i64,
    pub discount_price: Option<i64>,
    pub stock: i32,
    pub image: Option<String>,
    pub product_type: Option<String>,
    pub condition: Option<String>,
    pub rating: f64,
    pub review_count: i32,
    pub collection: Option<String>,
    pub collection_slug: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Discounted price if present, else the list price.
    pub fn effective_price(&self) -> i64 {
        self.discount_price.unwrap_or(self.price)
    }

    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}
