use std::fmt;
use std::sync::Arc;

use crate::catalog::{Catalog, Product, ProductId};
use crate::error::Result;

use super::repository::SelectionRepository;

/// The user's in-progress basket: an insertion-ordered set of catalog
/// products keyed by identifier.
///
/// Every mutating call writes the resulting identifier list through the
/// repository before it returns. The new state is computed first and only
/// swapped in after the write succeeded, so a failed save leaves both memory
/// and storage at the previous state.
pub struct SelectionSet {
    entries: Vec<Arc<Product>>,
    repository: Arc<dyn SelectionRepository>,
}

impl SelectionSet {
    /// Creates an empty selection backed by `repository`.
    pub fn new(repository: Arc<dyn SelectionRepository>) -> Self {
        Self {
            entries: Vec::new(),
            repository,
        }
    }

    /// Rebuilds the selection from persisted identifiers.
    ///
    /// Identifiers that no longer resolve against `catalog` are dropped
    /// silently; duplicates keep their first position.
    pub fn rehydrate(repository: Arc<dyn SelectionRepository>, catalog: &Catalog) -> Self {
        let mut entries: Vec<Arc<Product>> = Vec::new();

        for id in repository.load() {
            if entries.iter().any(|product| product.id == id) {
                continue;
            }
            match catalog.get(&id) {
                Some(product) => entries.push(product),
                None => {
                    tracing::debug!("[SelectionSet] Dropping stale persisted id: {}", id);
                }
            }
        }

        tracing::debug!("[SelectionSet] Rehydrated {} product(s)", entries.len());
        Self {
            entries,
            repository,
        }
    }

    /// Inserts `product` unless its id is already present. Persists either way.
    ///
    /// Returns `true` if the product was newly added.
    pub fn add(&mut self, product: Arc<Product>) -> Result<bool> {
        if self.has(&product.id) {
            self.commit(self.entries.clone())?;
            return Ok(false);
        }

        let mut next = self.entries.clone();
        next.push(product);
        self.commit(next)?;
        Ok(true)
    }

    /// Removes the product with `id` if present. Persists either way.
    ///
    /// Returns `true` if something was removed.
    pub fn remove(&mut self, id: &ProductId) -> Result<bool> {
        let next: Vec<Arc<Product>> = self
            .entries
            .iter()
            .filter(|product| &product.id != id)
            .cloned()
            .collect();
        let removed = next.len() != self.entries.len();
        self.commit(next)?;
        Ok(removed)
    }

    /// Removes `product` if selected, otherwise adds it.
    ///
    /// Returns `true` if the product is selected afterwards.
    pub fn toggle(&mut self, product: Arc<Product>) -> Result<bool> {
        if self.has(&product.id) {
            self.remove(&product.id)?;
            Ok(false)
        } else {
            self.add(product)?;
            Ok(true)
        }
    }

    /// Empties the selection.
    pub fn clear(&mut self) -> Result<()> {
        self.commit(Vec::new())
    }

    /// Insertion-ordered snapshot of the selected products.
    pub fn values(&self) -> Vec<Arc<Product>> {
        self.entries.clone()
    }

    pub fn ids(&self) -> Vec<ProductId> {
        self.entries.iter().map(|product| product.id.clone()).collect()
    }

    pub fn has(&self, id: &ProductId) -> bool {
        self.entries.iter().any(|product| &product.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn commit(&mut self, next: Vec<Arc<Product>>) -> Result<()> {
        let ids: Vec<ProductId> = next.iter().map(|product| product.id.clone()).collect();
        self.repository.save(&ids)?;
        self.entries = next;
        Ok(())
    }
}

impl fmt::Debug for SelectionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionSet")
            .field("ids", &self.ids())
            .finish()
    }
}
