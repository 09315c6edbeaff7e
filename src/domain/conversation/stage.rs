//! Stages of the guest intake conversation.
//!
//! A conversation walks a fixed path: language, then room, then the issue
//! text. There is no branching and no way back other than starting over.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The step an active conversation is waiting on.
///
/// A guest with no active conversation has no stage at all; absence is
/// modelled by the engine's state map, not by a variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationStage {
    /// Waiting for the guest to pick a language.
    AwaitingLanguage,

    /// Waiting for the guest to pick a room number.
    AwaitingRoom,

    /// Waiting for the free-form issue description.
    AwaitingIssue,
}

impl ConversationStage {
    /// Returns a short label for logs and diagnostics.
    pub fn label(&self) -> &'static str {
        match self {
            Self::AwaitingLanguage => "awaiting_language",
            Self::AwaitingRoom => "awaiting_room",
            Self::AwaitingIssue => "awaiting_issue",
        }
    }

    /// Returns the stage that follows this one, if any.
    pub fn next(&self) -> Option<ConversationStage> {
        match self {
            Self::AwaitingLanguage => Some(Self::AwaitingRoom),
            Self::AwaitingRoom => Some(Self::AwaitingIssue),
            Self::AwaitingIssue => None,
        }
    }

    /// Returns true if the stage consumes free-form text rather than a
    /// keyboard selection.
    pub fn expects_text(&self) -> bool {
        matches!(self, Self::AwaitingIssue)
    }
}

impl fmt::Display for ConversationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_chain_in_fixed_order() {
        assert_eq!(
            ConversationStage::AwaitingLanguage.next(),
            Some(ConversationStage::AwaitingRoom)
        );
        assert_eq!(
            ConversationStage::AwaitingRoom.next(),
            Some(ConversationStage::AwaitingIssue)
        );
        assert_eq!(ConversationStage::AwaitingIssue.next(), None);
    }

    #[test]
    fn only_issue_stage_expects_text() {
        assert!(!ConversationStage::AwaitingLanguage.expects_text());
        assert!(!ConversationStage::AwaitingRoom.expects_text());
        assert!(ConversationStage::AwaitingIssue.expects_text());
    }

    #[test]
    fn serializes_to_snake_case() {
        let json = serde_json::to_string(&ConversationStage::AwaitingRoom).unwrap();
        assert_eq!(json, "\"awaiting_room\"");
    }
}
