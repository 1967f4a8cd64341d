//! # Conversation Turns
//!
//! One entry in the chat history, authored by the user or the bot.
//! Bot turns may carry quick-reply options returned by a fallback reply.

use serde::{Deserialize, Serialize};

/// Who wrote a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Author {
    User,
    Bot,
}

/// A suggested follow-up query attached to a fallback reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallbackOption {
    pub label: String,
    pub query: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub author: Author,
    pub text: String,
    /// Quick replies; always empty for user turns.
    pub options: Vec<FallbackOption>,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            author: Author::User,
            text: text.into(),
            options: Vec::new(),
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            author: Author::Bot,
            text: text.into(),
            options: Vec::new(),
        }
    }

    pub fn bot_with_options(text: impl Into<String>, options: Vec<FallbackOption>) -> Self {
        Self {
            author: Author::Bot,
            text: text.into(),
            options,
        }
    }

    pub fn has_options(&self) -> bool {
        !self.options.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_turn_has_no_options() {
        let turn = Turn::user("salut");
        assert_eq!(turn.author, Author::User);
        assert!(!turn.has_options());
    }

    #[test]
    fn test_bot_turn_keeps_option_order() {
        let options = vec![
            FallbackOption {
                label: "Cariera".to_string(),
                query: "consiliere cariera".to_string(),
            },
            FallbackOption {
                label: "Psiholog".to_string(),
                query: "consiliere psihologica".to_string(),
            },
        ];
        let turn = Turn::bot_with_options("Alege:", options.clone());
        assert_eq!(turn.author, Author::Bot);
        assert_eq!(turn.options, options);
    }

    #[test]
    fn test_fallback_option_deserializes() {
        let option: FallbackOption =
            serde_json::from_str(r#"{"label":"Program","query":"care este programul"}"#).unwrap();
        assert_eq!(option.label, "Program");
        assert_eq!(option.query, "care este programul");
    }
}
