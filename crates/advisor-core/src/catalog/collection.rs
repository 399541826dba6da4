use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{AdvisorError, Result};

use super::model::{CatalogDocument, Product, ProductId};

/// The immutable product catalog for a session.
///
/// Products are shared as `Arc<Product>` so the selection set can reference
/// catalog entries without copying them. Lookup by id is O(1); category
/// filtering is a linear scan that preserves document order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Arc<Product>>,
    index: HashMap<ProductId, usize>,
}

impl Catalog {
    /// Builds a catalog from already-decoded products.
    ///
    /// # Errors
    ///
    /// Returns `AdvisorError::Fetch` if two products share an identifier.
    pub fn from_products(origin: &str, products: Vec<Product>) -> Result<Self> {
        let mut index = HashMap::with_capacity(products.len());
        let mut shared = Vec::with_capacity(products.len());

        for (position, product) in products.into_iter().enumerate() {
            if index.insert(product.id.clone(), position).is_some() {
                return Err(AdvisorError::fetch(
                    origin,
                    format!("duplicate product id '{}'", product.id),
                ));
            }
            shared.push(Arc::new(product));
        }

        Ok(Self {
            products: shared,
            index,
        })
    }

    /// Decodes a `{ "products": [...] }` document.
    ///
    /// # Errors
    ///
    /// Returns `AdvisorError::Fetch` if the payload is not valid JSON, lacks
    /// the `products` array, or any product misses a required field.
    pub fn from_json(origin: &str, bytes: &[u8]) -> Result<Self> {
        let document: CatalogDocument = serde_json::from_slice(bytes)
            .map_err(|err| AdvisorError::fetch(origin, format!("malformed catalog: {err}")))?;
        Self::from_products(origin, document.products)
    }

    /// All products, in document order.
    pub fn all(&self) -> &[Arc<Product>] {
        &self.products
    }

    /// Products whose category equals `category` exactly (no case folding).
    pub fn by_category(&self, category: &str) -> Vec<Arc<Product>> {
        self.products
            .iter()
            .filter(|product| product.category == category)
            .cloned()
            .collect()
    }

    /// Looks up a product, failing with `NotFound` when the id is unknown.
    pub fn by_id(&self, id: &ProductId) -> Result<Arc<Product>> {
        self.get(id)
            .ok_or_else(|| AdvisorError::not_found("Product", id.as_str()))
    }

    pub fn get(&self, id: &ProductId) -> Option<Arc<Product>> {
        self.index
            .get(id)
            .map(|&position| Arc::clone(&self.products[position]))
    }

    pub fn contains(&self, id: &ProductId) -> bool {
        self.index.contains_key(id)
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        for product in &self.products {
            if !seen.iter().any(|category| category == &product.category) {
                seen.push(product.category.clone());
            }
        }
        seen
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
