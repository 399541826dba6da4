//! Wires an `AdvisorSession` from configuration.

use advisor_core::error::Result;
use advisor_infrastructure::storage::FileKeyValueStore;
use advisor_infrastructure::{AdvisorConfig, StorageSelectionRepository, source_for};
use advisor_interaction::HttpAdvisoryClient;
use std::sync::Arc;

use crate::catalog_store::CatalogStore;
use crate::session::AdvisorSession;

/// Builds a session backed by the configured catalog, on-disk selection
/// storage and the HTTP advisory endpoint.
///
/// A missing endpoint is not an error here: browsing and selecting still
/// work, and each advisory request fails with `Configuration`.
pub fn session_from_config(config: &AdvisorConfig) -> Result<AdvisorSession> {
    let storage_file = config.storage_file()?;
    tracing::debug!(
        "[bootstrap] catalog={}, storage={}",
        config.catalog,
        storage_file.display()
    );

    let store = Arc::new(FileKeyValueStore::new(storage_file));
    let selection_repository = Arc::new(StorageSelectionRepository::new(store));
    let backend = Arc::new(HttpAdvisoryClient::from_config(config));
    if config.endpoint().is_err() {
        tracing::warn!("[bootstrap] No advisory endpoint configured; requests will fail");
    }

    Ok(AdvisorSession::new(
        CatalogStore::new(source_for(&config.catalog)),
        selection_repository,
        backend,
        config.system_directive(),
    ))
}
