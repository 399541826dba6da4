pub mod advisory;
pub mod catalog;
pub mod conversation;
pub mod error;
pub mod selection;

// Re-export common error type
pub use error::{AdvisorError, Result};
