use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageType {
    User,
    Assistant,
    System,
    Error,
    Info,
}

impl std::fmt::Display for MessageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageType::User => write!(f, "user"),
            MessageType::Assistant => write!(f, "assistant"),
            MessageType::System => write!(f, "system"),
            MessageType::Error => write!(f, "error"),
            MessageType::Info => write!(f, "info"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub timestamp: DateTime<Local>,
    pub message_type: MessageType,
    pub content: String,
}

impl ChatMessage {
    pub fn new(message_type: MessageType, content: String) -> Self {
        Self {
            timestamp: Local::now(),
            message_type,
            content,
        }
    }
}

/// Conversation turns the service client can replay to the model. Error and
/// info lines stay local.
pub fn conversation_turns(messages: &[ChatMessage]) -> Vec<(MessageType, String)> {
    messages
        .iter()
        .filter(|m| matches!(m.message_type, MessageType::User | MessageType::Assistant))
        .map(|m| (m.message_type, m.content.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversation_turns_drop_local_lines() {
        let messages = vec![
            ChatMessage::new(MessageType::System, "welcome".into()),
            ChatMessage::new(MessageType::User, "hello".into()),
            ChatMessage::new(MessageType::Error, "boom".into()),
            ChatMessage::new(MessageType::Assistant, "hi".into()),
        ];

        let turns = conversation_turns(&messages);
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].0, MessageType::User);
        assert_eq!(turns[1].0, MessageType::Assistant);
    }
}
