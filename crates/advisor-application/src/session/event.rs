use advisor_core::catalog::ProductId;
use advisor_core::conversation::TranscriptEntry;
use serde::Serialize;

/// State-change notifications published by an `AdvisorSession`.
///
/// Observers re-read the relevant snapshot (or use the payload directly)
/// instead of the session writing to any view itself.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    CatalogLoaded { product_count: usize },
    /// The selection changed; carries the ids in insertion order.
    SelectionChanged { selected: Vec<ProductId> },
    TranscriptAppended { entry: TranscriptEntry },
    /// An advisory request was sent; triggering actions should be disabled.
    RequestStarted,
    RequestFinished { succeeded: bool },
}
