use crate::models::message::Message;

/// In-memory record of the current chat, oldest message first.
///
/// Messages can only be appended. The whole store can be cleared when the
/// user starts a new chat, but individual entries are never edited or removed.
#[derive(Debug, Default, Clone)]
pub struct ConversationStore {
    messages: Vec<Message>,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: Message) -> &Message {
        self.messages.push(message);
        // just pushed, so never empty
        &self.messages[self.messages.len() - 1]
    }

    pub fn push_user<S: Into<String>>(&mut self, content: S) -> &Message {
        self.push(Message::user(content))
    }

    pub fn push_assistant<S: Into<String>>(&mut self, content: S) -> &Message {
        self.push(Message::assistant(content))
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Content of the most recent user message, used to regenerate a reply
    pub fn last_user_prompt(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|message| message.is_user())
            .map(|message| message.text())
    }

    pub fn reset(&mut self) {
        self.messages.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::role::Role;

    #[test]
    fn test_push_preserves_insertion_order() {
        let mut store = ConversationStore::new();
        for i in 0..10 {
            if i % 2 == 0 {
                store.push_user(format!("message {}", i));
            } else {
                store.push_assistant(format!("message {}", i));
            }
        }

        assert_eq!(store.len(), 10);
        for (i, message) in store.messages().iter().enumerate() {
            assert_eq!(message.content, format!("message {}", i));
            let expected = if i % 2 == 0 { Role::User } else { Role::Assistant };
            assert_eq!(message.role, expected);
        }
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut store = ConversationStore::new();
        store.push_user("one");
        store.push_assistant("two");
        store.reset();

        assert!(store.is_empty());
        assert!(store.messages().is_empty());
        assert_eq!(store.last_user_prompt(), None);

        store.push_user("after reset");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_last_user_prompt_skips_assistant_messages() {
        let mut store = ConversationStore::new();
        assert_eq!(store.last_user_prompt(), None);

        store.push_user("first question");
        store.push_assistant("first answer");
        store.push_user("second question");
        store.push_assistant("second answer");

        assert_eq!(store.last_user_prompt(), Some("second question"));
    }

    #[test]
    fn test_push_returns_stored_message() {
        let mut store = ConversationStore::new();
        let id = store.push_user("hello").id;
        assert_eq!(store.messages()[0].id, id);
    }
}
