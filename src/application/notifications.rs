//! Notification fan-out to staff channels and guests.
//!
//! Delivery is best-effort by contract: a failed send is logged and
//! swallowed, and nothing in the ticket lifecycle ever waits on, or is
//! aborted by, a notification. The one piece of state that depends on the
//! gateway is the staff reference, and only the first configured channel can
//! supply it.

use std::sync::Arc;
use tracing::warn;

use crate::domain::foundation::{ChannelId, GuestId, Language, TicketId};
use crate::domain::localization::{self, MessageKey};
use crate::domain::ticket::{StaffReference, Ticket};
use crate::ports::{GuestKeyboard, MessageGateway};

/// Routes lifecycle notifications to the right parties.
pub struct NotificationRouter {
    gateway: Arc<dyn MessageGateway>,
    staff_channels: Vec<ChannelId>,
}

impl NotificationRouter {
    pub fn new(gateway: Arc<dyn MessageGateway>, staff_channels: Vec<ChannelId>) -> Self {
        Self {
            gateway,
            staff_channels,
        }
    }

    /// Sends the language selection banner.
    pub async fn prompt_language(&self, guest: &GuestId) {
        self.send_guest(
            guest,
            localization::text_or_default(MessageKey::ChooseLanguage, None),
            GuestKeyboard::Languages,
        )
        .await;
    }

    /// Sends the room selection prompt in the chosen language.
    pub async fn prompt_room(&self, guest: &GuestId, language: Language) {
        self.send_guest(
            guest,
            localization::text(MessageKey::ChooseRoom, language),
            GuestKeyboard::Rooms,
        )
        .await;
    }

    /// Asks the guest to describe the issue.
    pub async fn prompt_issue(&self, guest: &GuestId, language: Language) {
        self.send_guest(
            guest,
            localization::text(MessageKey::AskIssue, language),
            GuestKeyboard::None,
        )
        .await;
    }

    /// Sends a templated message to a guest, falling back to the default
    /// language when none is known yet.
    pub async fn notify_guest(&self, guest: &GuestId, key: MessageKey, language: Option<Language>) {
        self.send_guest(
            guest,
            localization::text_or_default(key, language),
            GuestKeyboard::None,
        )
        .await;
    }

    /// Announces a fresh ticket to every staff channel.
    ///
    /// Returns the reference of the first channel's message, which becomes
    /// the ticket's thread target. When the first channel fails there is no
    /// primary reference, even if later channels succeed; resolution then
    /// simply lacks a thread target.
    pub async fn announce_new_ticket(&self, ticket: &Ticket) -> Option<StaffReference> {
        let text = format_announcement(ticket);
        let mut primary = None;

        for (position, channel) in self.staff_channels.iter().enumerate() {
            match self
                .gateway
                .send_staff_message(channel, &text, Some(&ticket.id))
                .await
            {
                Ok(reference) => {
                    if position == 0 {
                        primary = Some(reference);
                    }
                }
                Err(err) => {
                    warn!(
                        channel = %channel,
                        ticket_id = %ticket.id,
                        error = %err,
                        "staff announcement failed for channel"
                    );
                }
            }
        }

        primary
    }

    /// Posts the resolved confirmation under the original staff message.
    pub async fn notify_staff_resolved(&self, reference: &StaffReference, ticket_id: &TicketId) {
        let text = format!("✅ Muammo hal qilindi. (ID: {})", ticket_id);
        if let Err(err) = self.gateway.send_threaded_reply(reference, &text).await {
            warn!(
                ticket_id = %ticket_id,
                error = %err,
                "resolved confirmation failed"
            );
        }
    }

    async fn send_guest(&self, guest: &GuestId, text: &str, keyboard: GuestKeyboard) {
        if let Err(err) = self.gateway.send_guest_message(guest, text, keyboard).await {
            warn!(guest = %guest, error = %err, "guest notification failed");
        }
    }
}

/// Staff channel summary of a new ticket.
fn format_announcement(ticket: &Ticket) -> String {
    format!(
        "🚨 Yangi murojaat!\n🆔 {}\n🏠 Xona: {}\n👤 {} (@{})\n\n✉️ {}",
        ticket.id,
        ticket.room,
        ticket.guest.display_name,
        ticket.guest.handle_or_placeholder(),
        ticket.text,
    )
}
