//! Session-scoped shopping cart.
//!
//! The cart lives on the client side of the storefront: one [`CartStore`] per
//! browser session, persisted through a [`CartStorage`] so a reload does not
//! lose it. There is no server-side cart record.

pub mod storage;
pub mod store;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::models::Product;

pub use storage::{CartStorage, JsonFileStorage, MemoryStorage, StorageError};
pub use store::CartStore;

/// Quantity ceiling used when a product's stock is unknown.
pub const FALLBACK_STOCK_CEILING: i32 = 999;

/// Largest unit price (in paise) a cart accepts.
pub const MAX_UNIT_PRICE: i64 = 1_000_000_000_000;

/// Copy of the product taken when it was added to the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartProduct {
    pub id: Uuid,
    pub name: String,
    pub price: i64,
    #[serde(default)]
    pub discount_price: Option<i64>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub stock: Option<i32>,
    #[serde(default, rename = "type")]
    pub product_type: Option<String>,
    #[serde(default)]
    pub collection: Option<String>,
}

impl CartProduct {
    pub fn effective_price(&self) -> i64 {
        self.discount_price.unwrap_or(self.price)
    }

    /// Highest quantity a line item for this product may hold.
    ///
    /// Unknown or non-positive stock falls back to [`FALLBACK_STOCK_CEILING`].
    pub fn quantity_ceiling(&self) -> i32 {
        match self.stock {
            Some(stock) if stock > 0 => stock,
            _ => FALLBACK_STOCK_CEILING,
        }
    }

    pub fn clamp_quantity(&self, quantity: i32) -> i32 {
        quantity.clamp(1, self.quantity_ceiling())
    }

    /// First of the list and discount prices outside `0..=MAX_UNIT_PRICE`, if any.
    pub fn out_of_range_price(&self) -> Option<i64> {
        std::iter::once(self.price)
            .chain(self.discount_price)
            .find(|price| !(0..=MAX_UNIT_PRICE).contains(price))
    }
}

impl From<&Product> for CartProduct {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            price: product.price,
            discount_price: product.discount_price,
            image: product.image.clone(),
            stock: Some(product.stock),
            product_type: product.product_type.clone(),
            collection: product.collection.clone(),
        }
    }
}

impl From<Product> for CartProduct {
    fn from(product: Product) -> Self {
        Self::from(&product)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLineItem {
    pub product: CartProduct,
    pub quantity: i32,
}

impl CartLineItem {
    pub fn line_total(&self) -> i64 {
        self.product
            .effective_price()
            .saturating_mul(i64::from(self.quantity))
    }
}

/// Totals shown next to the cart. Shipping is free.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CartSummary {
    pub line_count: usize,
    pub item_count: i64,
    pub subtotal: i64,
    pub shipping: i64,
    pub total: i64,
}

/// Answers whether the current caller is signed in.
pub trait AuthState {
    fn is_authenticated(&self) -> bool;
}

/// Authentication state of the browser session that owns a cart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    user_id: Option<Uuid>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self { user_id: None }
    }

    pub fn signed_in(user_id: Uuid) -> Self {
        Self {
            user_id: Some(user_id),
        }
    }

}

impl AuthState for Session {
    fn is_authenticated(&self) -> bool {
        self.user_id.is_some()
    }
}

#[derive(Debug, Error)]
pub enum CartError {
    #[error("quantity must be greater than 0, got {0}")]
    Validation(i32),

    #[error("unit price out of range: {0}")]
    InvalidPrice(i64),

    #[error("authentication required")]
    AuthRequired,

    #[error("cart storage failed")]
    Storage(#[from] StorageError),
}

impl CartError {
    /// Text for the notification shown to the shopper.
    pub fn user_message(&self) -> &'static str {
        match self {
            CartError::Validation(_) => "Please choose a quantity of at least 1",
            CartError::InvalidPrice(_) => "This product cannot be added to the cart right now",
            CartError::AuthRequired => "Please login to add items to cart",
            CartError::Storage(_) => "Your cart could not be saved, please try again",
        }
    }
}
