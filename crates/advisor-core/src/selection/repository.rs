//! Selection repository trait.

use crate::catalog::ProductId;
use crate::error::Result;

/// Durable storage for the selected product identifiers.
///
/// Implementations are synchronous: the selection set calls `save` before a
/// mutating operation returns, so a visible change is never lost.
pub trait SelectionRepository: Send + Sync {
    /// Replaces the persisted identifiers with `ids`.
    fn save(&self, ids: &[ProductId]) -> Result<()>;

    /// Reads the persisted identifiers.
    ///
    /// Never fails: absent, unparsable or wrongly shaped state is reported as
    /// an empty list.
    fn load(&self) -> Vec<ProductId>;
}
