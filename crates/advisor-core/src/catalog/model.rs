//! Product types.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Stable identifier of a catalog product.
///
/// Catalog documents and persisted selections have used both JSON integers
/// and JSON strings for identifiers, so deserialization accepts either and
/// stores the canonical string form. `1` and `"1"` are the same id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ProductId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<u64> for ProductId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawProductId {
    Text(String),
    Unsigned(u64),
    Signed(i64),
}

impl<'de> Deserialize<'de> for ProductId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawProductId::deserialize(deserializer)?;
        Ok(match raw {
            RawProductId::Text(text) => Self(text),
            RawProductId::Unsigned(n) => Self(n.to_string()),
            RawProductId::Signed(n) => Self(n.to_string()),
        })
    }
}

/// A purchasable catalog item. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub brand: String,
    pub name: String,
    pub category: String,
    pub description: String,
    /// Image reference (URL or relative path), passed through to the view.
    pub image: String,
}

/// Wire shape of a catalog document: `{ "products": [ ... ] }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogDocument {
    pub products: Vec<Product>,
}
