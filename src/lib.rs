pub mod cart;
pub mod config;
pub mod db;
pub mod entity;
pub mod error;
pub mod models;
pub mod response;
pub mod routes;
pub mod seo;
pub mod services;
pub mod sitemap;
pub mod state;
