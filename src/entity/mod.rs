pub mod collections;
pub mod products;

pub use collections::Entity as Collections;
pub use products::Entity as Products;
