use super::message::{Message, MessageRole};

/// Ordered, append-only history of the conversation with the advisor.
///
/// The full sequence is replayed to the endpoint on every request. Messages
/// are never mutated, removed or reordered once appended, and there is no
/// truncation policy: the log grows for the lifetime of the session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationLog {
    messages: Vec<Message>,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a log whose first entry is the given system directive.
    pub fn with_system_directive(directive: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::system(directive)],
        }
    }

    pub fn append(&mut self, role: MessageRole, content: impl Into<String>) {
        self.messages.push(Message::new(role, content));
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// The full ordered history, for transmission.
    pub fn snapshot(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_directive_comes_first() {
        let mut log = ConversationLog::with_system_directive("You are an advisor.");
        log.append(MessageRole::User, "hello");

        assert_eq!(log.len(), 2);
        assert_eq!(log.snapshot()[0].role, MessageRole::System);
        assert_eq!(log.last().unwrap().content, "hello");
    }

    #[test]
    fn test_append_preserves_order() {
        let mut log = ConversationLog::new();
        log.append(MessageRole::User, "one");
        log.push(Message::assistant("two"));
        log.append(MessageRole::User, "three");

        let contents: Vec<&str> = log.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["one", "two", "three"]);
    }
}
