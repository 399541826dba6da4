//! Selection domain module.
//!
//! - `set`: The user's basket (`SelectionSet`)
//! - `repository`: Persistence boundary for the basket (`SelectionRepository`)

mod repository;
mod set;

pub use repository::SelectionRepository;
pub use set::SelectionSet;
