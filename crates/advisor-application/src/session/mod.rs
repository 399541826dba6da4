//! Advisor session: use cases driven by the view layer.
//!
//! - `advisor_session`: `AdvisorSession` (select, deselect, toggle, generate, ask)
//! - `event`: `SessionEvent` notifications for observers

mod advisor_session;
mod event;

pub use advisor_session::{
    AdvisorSession, EMPTY_SELECTION_NOTICE, GENERATE_PROMPT, REQUEST_FAILED_NOTICE, WORKING_NOTICE,
};
pub use event::SessionEvent;
