//! Application layer of the routine advisor.
//!
//! [`AdvisorSession`] is the single owner of the catalog, the selection set
//! and the conversation for one user session. A view layer forwards user
//! intents to it and re-renders on [`SessionEvent`]s.

pub mod bootstrap;
pub mod catalog_store;
pub mod session;
pub mod telemetry;

pub use catalog_store::CatalogStore;
pub use session::{AdvisorSession, SessionEvent};
