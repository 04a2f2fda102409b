use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Maximum title length, in characters, before truncation.
pub const TITLE_MAX_CHARS: usize = 40;
pub const DEFAULT_TITLE: &str = "Chat History";
pub const UNTITLED: &str = "Untitled";
pub const PREVIEW_CHARS: usize = 100;

/// One element of a day's mood file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MoodEntry {
    /// ISO-8601 local date-time of the recording.
    pub timestamp: String,
    pub score: f64,
}

/// Average mood of one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DailyMood {
    /// The day, `YYYY-MM-DD`.
    pub timestamp: String,
    pub avg_mood: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ChatTurn {
    pub sender: Sender,
    pub text: String,
}

/// Contents of `history/<session_id>.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ChatSession {
    pub title: String,
    pub history: Vec<ChatTurn>,
    pub timestamp: String,
}

impl ChatSession {
    /// Title shown in the session list: the first user turn, cut to
    /// [`TITLE_MAX_CHARS`] characters plus `"..."`.
    pub fn derive_title(history: &[ChatTurn]) -> String {
        let first = history
            .iter()
            .find(|t| t.sender == Sender::User)
            .map(|t| t.text.as_str())
            .unwrap_or(DEFAULT_TITLE);

        if first.chars().count() > TITLE_MAX_CHARS {
            let head: String = first.chars().take(TITLE_MAX_CHARS).collect();
            format!("{head}...")
        } else {
            first.to_owned()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SessionSummary {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct JournalSummary {
    pub id: String,
    pub preview: String,
}

#[cfg(test)]
mod test {
    use super::*;

    fn turn(sender: Sender, text: &str) -> ChatTurn {
        ChatTurn { sender, text: text.into() }
    }

    #[test]
    fn title_uses_first_user_turn() {
        let h = vec![
            turn(Sender::Bot, "Hi, I'm Phoenix."),
            turn(Sender::User, "Exams next week"),
            turn(Sender::User, "second"),
        ];
        assert_eq!(ChatSession::derive_title(&h), "Exams next week");
    }

    #[test]
    fn long_title_is_truncated_with_ellipsis() {
        let text = "a".repeat(41);
        let title = ChatSession::derive_title(&[turn(Sender::User, &text)]);
        assert_eq!(title, format!("{}...", "a".repeat(40)));
    }

    #[test]
    fn forty_chars_is_not_truncated() {
        let text = "b".repeat(40);
        assert_eq!(ChatSession::derive_title(&[turn(Sender::User, &text)]), text);
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let text = "é".repeat(45);
        let title = ChatSession::derive_title(&[turn(Sender::User, &text)]);
        assert_eq!(title.chars().count(), 43);
    }

    #[test]
    fn no_user_turn_gives_default_title() {
        let h = vec![turn(Sender::Bot, "hello"), turn(Sender::Bot, "anyone?")];
        assert_eq!(ChatSession::derive_title(&h), DEFAULT_TITLE);
    }

    #[test]
    fn sender_serializes_lowercase() {
        let v = serde_json::to_value(turn(Sender::Bot, "x")).unwrap();
        assert_eq!(v["sender"], "bot");
    }
}
