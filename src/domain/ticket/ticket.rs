//! The ticket record and its satellite value objects.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    ChannelId, GuestId, Language, MessageId, RoomNumber, TicketId, Timestamp, ValidationError,
};

/// Identity of the reporting guest, captured at ticket creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestProfile {
    pub guest_id: GuestId,
    pub display_name: String,
    /// Public handle on the chat platform, when the guest has one.
    pub handle: Option<String>,
}

impl GuestProfile {
    /// Creates a profile, returning an error when the display name is empty.
    pub fn new(
        guest_id: GuestId,
        display_name: impl Into<String>,
        handle: Option<String>,
    ) -> Result<Self, ValidationError> {
        let display_name = display_name.into();
        if display_name.trim().is_empty() {
            return Err(ValidationError::empty_field("display_name"));
        }
        Ok(Self {
            guest_id,
            display_name,
            handle,
        })
    }

    /// Returns the handle, or a placeholder for guests without one.
    pub fn handle_or_placeholder(&self) -> &str {
        self.handle.as_deref().unwrap_or("no_username")
    }
}

/// Locator of the staff message announcing a ticket.
///
/// Later lifecycle updates are threaded under this message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffReference {
    pub channel_id: ChannelId,
    pub message_id: MessageId,
}

impl StaffReference {
    pub fn new(channel_id: ChannelId, message_id: MessageId) -> Self {
        Self {
            channel_id,
            message_id,
        }
    }
}

/// One guest-reported issue and its resolution state.
///
/// Identity, room, language, and text are fixed at creation. The only
/// mutable fields are `resolved` (monotone, false to true exactly once) and
/// `staff_reference` (set once, first writer wins).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: TicketId,
    pub guest: GuestProfile,
    pub room: RoomNumber,
    pub language: Language,
    pub text: String,
    pub resolved: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub staff_reference: Option<StaffReference>,
    pub created_at: Timestamp,
}

impl Ticket {
    /// Creates an unresolved ticket for a freshly submitted issue.
    ///
    /// The id is derived from the guest and the originating message, so a
    /// retried delivery maps to the same ticket.
    ///
    /// # Errors
    /// Returns `ValidationError` when the issue text is empty or whitespace.
    pub fn new(
        guest: GuestProfile,
        origin: &MessageId,
        room: RoomNumber,
        language: Language,
        text: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(ValidationError::empty_field("text"));
        }
        let id = TicketId::derive(&guest.guest_id, origin);
        Ok(Self {
            id,
            guest,
            room,
            language,
            text,
            resolved: false,
            staff_reference: None,
            created_at: Timestamp::now(),
        })
    }

    /// Returns true once the ticket has been resolved.
    pub fn is_resolved(&self) -> bool {
        self.resolved
    }
}
