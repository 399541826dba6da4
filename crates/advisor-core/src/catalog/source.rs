//! Catalog source trait.

use async_trait::async_trait;

use super::collection::Catalog;
use crate::error::Result;

/// A read-only origin of the product catalog (a local file, an HTTP URL, ...).
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetches and decodes the whole catalog.
    ///
    /// Fails with `AdvisorError::Fetch` when the origin is unreachable or the
    /// payload is malformed.
    async fn fetch(&self) -> Result<Catalog>;

    /// Human-readable origin used in logs and error messages.
    fn describe(&self) -> String;
}
