/// An entry in the recent-chats listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChatSummary {
    pub id: &'static str,
    pub title: &'static str,
    pub timestamp: &'static str,
}

// Placeholder conversations, nothing is stored between runs
static RECENT_CHATS: [ChatSummary; 3] = [
    ChatSummary {
        id: "1",
        title: "Previous conversation",
        timestamp: "2 hours ago",
    },
    ChatSummary {
        id: "2",
        title: "Another chat",
        timestamp: "Yesterday",
    },
    ChatSummary {
        id: "3",
        title: "Older discussion",
        timestamp: "3 days ago",
    },
];

pub fn recent_chats() -> &'static [ChatSummary] {
    &RECENT_CHATS
}

pub fn find_chat(id: &str) -> Option<&'static ChatSummary> {
    RECENT_CHATS.iter().find(|chat| chat.id == id.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recent_chats_listing() {
        let titles: Vec<_> = recent_chats().iter().map(|c| c.title).collect();
        assert_eq!(
            titles,
            vec!["Previous conversation", "Another chat", "Older discussion"]
        );
    }

    #[test]
    fn test_find_chat() {
        assert_eq!(find_chat(" 2 ").map(|c| c.title), Some("Another chat"));
        assert_eq!(find_chat("4"), None);
    }
}
