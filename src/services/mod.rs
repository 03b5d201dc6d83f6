pub mod product_service;
pub mod sitemap_service;
