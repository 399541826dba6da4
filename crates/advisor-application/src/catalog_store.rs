//! Lazily loaded, session-wide catalog.

use advisor_core::catalog::{Catalog, CatalogSource, Product, ProductId};
use advisor_core::error::Result;
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Holds the catalog for the lifetime of a session.
///
/// The source is fetched at most once: the first successful `load` is cached
/// and every later call returns it without touching the source. A failed
/// fetch is not cached, so the next call retries.
pub struct CatalogStore {
    source: Arc<dyn CatalogSource>,
    catalog: OnceCell<Arc<Catalog>>,
}

impl CatalogStore {
    pub fn new(source: Arc<dyn CatalogSource>) -> Self {
        Self {
            source,
            catalog: OnceCell::new(),
        }
    }

    /// Loads the catalog, or returns the cached one.
    pub async fn load(&self) -> Result<Arc<Catalog>> {
        let catalog = self
            .catalog
            .get_or_try_init(|| async {
                let origin = self.source.describe();
                tracing::info!("[CatalogStore] Fetching catalog from {}", origin);
                match self.source.fetch().await {
                    Ok(catalog) => {
                        tracing::info!("[CatalogStore] Loaded {} product(s)", catalog.len());
                        Ok(Arc::new(catalog))
                    }
                    Err(err) => {
                        tracing::error!("[CatalogStore] {}", err);
                        Err(err)
                    }
                }
            })
            .await?;
        Ok(Arc::clone(catalog))
    }

    /// The cached catalog, if it has been loaded.
    pub fn loaded(&self) -> Option<Arc<Catalog>> {
        self.catalog.get().cloned()
    }

    pub async fn by_category(&self, category: &str) -> Result<Vec<Arc<Product>>> {
        Ok(self.load().await?.by_category(category))
    }

    pub async fn by_id(&self, id: &ProductId) -> Result<Arc<Product>> {
        self.load().await?.by_id(id)
    }

    pub async fn categories(&self) -> Result<Vec<String>> {
        Ok(self.load().await?.categories())
    }
}
