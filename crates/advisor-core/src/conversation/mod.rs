//! Conversation domain module.
//!
//! # Module Structure
//!
//! - `message`: Wire messages exchanged with the advisory endpoint (`MessageRole`, `Message`)
//! - `log`: Append-only history replayed on every request (`ConversationLog`)
//! - `transcript`: User-visible record, including local notices (`Transcript`)

mod log;
mod message;
mod transcript;

pub use log::ConversationLog;
pub use message::{Message, MessageRole};
pub use transcript::{EntryKind, Speaker, Transcript, TranscriptEntry};
