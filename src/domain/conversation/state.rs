//! Per-guest conversation state with pure transitions.

use serde::{Deserialize, Serialize};

use super::ConversationStage;
use crate::domain::foundation::{Language, RoomNumber};

/// State of one guest's active intake conversation.
///
/// Selections accumulate in the variants themselves, so a state in
/// `AwaitingIssue` always carries a language and a room. Ticket creation
/// reads both from there; there is no way to reach submission with either
/// missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "stage", rename_all = "snake_case")]
pub enum ConversationState {
    AwaitingLanguage,
    AwaitingRoom { language: Language },
    AwaitingIssue { language: Language, room: RoomNumber },
}

impl ConversationState {
    /// Entry point of every conversation.
    pub fn begin() -> Self {
        Self::AwaitingLanguage
    }

    /// Returns the stage this state is waiting on.
    pub fn stage(&self) -> ConversationStage {
        match self {
            Self::AwaitingLanguage => ConversationStage::AwaitingLanguage,
            Self::AwaitingRoom { .. } => ConversationStage::AwaitingRoom,
            Self::AwaitingIssue { .. } => ConversationStage::AwaitingIssue,
        }
    }

    /// Returns the chosen language, once one has been chosen.
    pub fn language(&self) -> Option<Language> {
        match self {
            Self::AwaitingLanguage => None,
            Self::AwaitingRoom { language } | Self::AwaitingIssue { language, .. } => {
                Some(*language)
            }
        }
    }

    /// Applies a language selection.
    ///
    /// Valid only in `AwaitingLanguage`; any other stage returns `None` and
    /// the caller keeps the current state unchanged.
    pub fn choose_language(&self, language: Language) -> Option<ConversationState> {
        match self {
            Self::AwaitingLanguage => Some(Self::AwaitingRoom { language }),
            _ => None,
        }
    }

    /// Applies a room selection.
    ///
    /// Valid only in `AwaitingRoom`; any other stage returns `None`.
    pub fn choose_room(&self, room: RoomNumber) -> Option<ConversationState> {
        match self {
            Self::AwaitingRoom { language } => Some(Self::AwaitingIssue {
                language: *language,
                room,
            }),
            _ => None,
        }
    }

    /// Returns the accumulated selections when the conversation is ready to
    /// accept issue text.
    pub fn submission_fields(&self) -> Option<(Language, RoomNumber)> {
        match self {
            Self::AwaitingIssue { language, room } => Some((*language, *room)),
            _ => None,
        }
    }
}
