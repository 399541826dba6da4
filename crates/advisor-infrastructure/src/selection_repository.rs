//! Persistence adapter for the selection set.
//!
//! The selection is stored as a JSON array of product identifiers under a
//! fixed, versioned key. Reads are forgiving: earlier versions of the widget
//! wrote integer ids, string ids, or whole product snapshots, and all of
//! them are accepted. Anything else reads as "no selection".

use advisor_core::catalog::ProductId;
use advisor_core::error::Result;
use advisor_core::selection::SelectionRepository;
use serde::Deserialize;
use std::sync::Arc;

use crate::storage::KeyValueStore;

/// Storage key holding the serialized selection.
pub const SELECTION_KEY: &str = "selected_products@v1";

/// One element of a persisted selection array.
#[derive(Deserialize)]
#[serde(untagged)]
enum PersistedEntry {
    Id(ProductId),
    Snapshot { id: ProductId },
}

impl PersistedEntry {
    fn into_id(self) -> ProductId {
        match self {
            PersistedEntry::Id(id) | PersistedEntry::Snapshot { id } => id,
        }
    }
}

/// `SelectionRepository` backed by a `KeyValueStore`.
pub struct StorageSelectionRepository {
    store: Arc<dyn KeyValueStore>,
}

impl StorageSelectionRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    fn decode(raw: &str) -> Option<Vec<ProductId>> {
        let entries: Vec<PersistedEntry> = serde_json::from_str(raw).ok()?;
        Some(entries.into_iter().map(PersistedEntry::into_id).collect())
    }
}

impl SelectionRepository for StorageSelectionRepository {
    fn save(&self, ids: &[ProductId]) -> Result<()> {
        let encoded = serde_json::to_string(ids)?;
        self.store.set_item(SELECTION_KEY, &encoded)?;
        tracing::debug!("[SelectionRepository] Saved {} id(s)", ids.len());
        Ok(())
    }

    fn load(&self) -> Vec<ProductId> {
        let raw = match self.store.get_item(SELECTION_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                tracing::debug!(
                    "[SelectionRepository] Storage unreadable, starting empty: {}",
                    err
                );
                return Vec::new();
            }
        };

        Self::decode(&raw).unwrap_or_else(|| {
            tracing::debug!("[SelectionRepository] Ignoring malformed persisted selection");
            Vec::new()
        })
    }
}
