use std::env;

pub const DEFAULT_SITE_URL: &str = "https://reeown.eco-dispose.com";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub db_max_connections: u32,
    pub site: SiteConfig,
}

/// Public-facing identity of the storefront, used when building absolute URLs.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub base_url: String,
    pub name: String,
    pub description: String,
}

impl SiteConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            name: "Reeown by Eco Dispose".to_string(),
            description: "Premium certified refurbished smartphones, laptops, tablets and electronics."
                .to_string(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn logo_url(&self) -> String {
        self.url("/logo_light.png")
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SITE_URL)
    }
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL")?;
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        let db_max_connections = env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|n| n.parse::<u32>().ok())
            .unwrap_or(10);
        let site_url = env::var("SITE_URL").unwrap_or_else(|_| DEFAULT_SITE_URL.to_string());
        Ok(Self {
            port,
            database_url,
            host,
            db_max_connections,
            site: SiteConfig::new(site_url),
        })
    }
}
