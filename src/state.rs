use std::sync::Arc;

use crate::{config::SiteConfig, db::OrmConn};

/// Shared handler state. The connection sits behind an `Arc` because
/// `DatabaseConnection` is not `Clone` once sea-orm's mock backend is enabled.
#[derive(Clone)]
pub struct AppState {
    pub orm: Arc<OrmConn>,
    pub site: Arc<SiteConfig>,
}

impl AppState {
    pub fn new(orm: OrmConn, site: SiteConfig) -> Self {
        Self {
            orm: Arc::new(orm),
            site: Arc::new(site),
        }
    }
}
