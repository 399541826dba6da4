//! User-visible conversation record.
//!
//! The transcript mirrors what a chat window shows. Unlike the
//! `ConversationLog`, it also holds local notices (empty selection, failed
//! requests, progress hints) that are never sent to the advisory endpoint.

use serde::{Deserialize, Serialize};

/// Who a transcript line is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Speaker {
    You,
    Advisor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// Mirrors a message in the conversation log.
    Message,
    /// Generated locally; has no counterpart in the conversation log.
    Notice,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub speaker: Speaker,
    pub kind: EntryKind,
    pub text: String,
    /// Timestamp when the entry was created (RFC 3339).
    pub timestamp: String,
}

#[derive(Debug, Clone, Default)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(
        &mut self,
        speaker: Speaker,
        kind: EntryKind,
        text: impl Into<String>,
    ) -> &TranscriptEntry {
        self.entries.push(TranscriptEntry {
            speaker,
            kind,
            text: text.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        });
        &self.entries[self.entries.len() - 1]
    }

    pub fn push_user(&mut self, text: impl Into<String>) -> &TranscriptEntry {
        self.push(Speaker::You, EntryKind::Message, text)
    }

    pub fn push_advisor(&mut self, text: impl Into<String>) -> &TranscriptEntry {
        self.push(Speaker::Advisor, EntryKind::Message, text)
    }

    pub fn push_notice(&mut self, text: impl Into<String>) -> &TranscriptEntry {
        self.push(Speaker::Advisor, EntryKind::Notice, text)
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn last(&self) -> Option<&TranscriptEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_is_attributed_to_advisor() {
        let mut transcript = Transcript::new();
        transcript.push_user("hi");
        let notice = transcript.push_notice("Please select one or more products first.");

        assert_eq!(notice.speaker, Speaker::Advisor);
        assert_eq!(notice.kind, EntryKind::Notice);
        assert!(!notice.timestamp.is_empty());
        assert_eq!(transcript.len(), 2);
    }
}
