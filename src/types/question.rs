//! Questions and conversation turns.

use serde::{Deserialize, Serialize};

/// A benchmark question, as produced by a dataset adapter.
///
/// Read-only for the debate core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Identifier, stable across shuffles.
    pub id: String,

    /// Text sent to every agent as the opening user turn.
    pub prompt: String,

    /// Canonical gold answer (`yes`, `B`, `e`, `18`, ...).
    pub gold_answer: String,

    /// Answer options, already lettered (`A)...`), if the dataset has them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,

    /// Reference explanation, if the dataset ships one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gold_explanation: Option<String>,
}

impl Question {
    /// Creates a new question.
    pub fn new(
        id: impl Into<String>,
        prompt: impl Into<String>,
        gold_answer: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            prompt: prompt.into(),
            gold_answer: gold_answer.into(),
            options: None,
            gold_explanation: None,
        }
    }

    /// Sets the answer options.
    #[must_use]
    pub fn with_options(mut self, options: Vec<String>) -> Self {
        self.options = Some(options);
        self
    }

    /// Sets the gold explanation.
    #[must_use]
    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.gold_explanation = Some(explanation.into());
        self
    }
}

/// Author of a conversation turn.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

/// One message of an agent conversation.
///
/// Serializes as `{"role": "...", "content": "..."}`, the chat-completions
/// message shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    /// Creates a user turn.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Creates an assistant turn.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_serializes_as_chat_message() {
        let json = serde_json::to_string(&Turn::user("hi")).unwrap();
        assert_eq!(json, r#"{"role":"user","content":"hi"}"#);
    }

    #[test]
    fn test_question_builder() {
        let q = Question::new("aqua-1", "2+2?", "B")
            .with_options(vec!["A)3".into(), "B)4".into()])
            .with_explanation("basic arithmetic");

        assert_eq!(q.gold_answer, "B");
        assert_eq!(q.options.as_ref().map(Vec::len), Some(2));
        assert!(q.gold_explanation.is_some());
    }
}
