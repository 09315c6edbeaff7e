//! Message Gateway Port - Narrow interface to the chat platform.
//!
//! The platform itself (delivery, button rendering, webhooks) is an external
//! collaborator. The core only ever asks it to send three kinds of message
//! and never depends on delivery succeeding; callers log failures and move
//! on.

use async_trait::async_trait;

use crate::domain::foundation::{ChannelId, GuestId, TicketId};
use crate::domain::ticket::StaffReference;

/// Errors that can occur when handing a message to the platform.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("Delivery failed: {0}")]
    DeliveryFailed(String),
}

/// Selection keyboard to attach to a guest message.
///
/// The gateway renders these however the platform likes; the core only names
/// which fixed choice set applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuestKeyboard {
    /// No keyboard, plain message.
    None,

    /// One button per supported language.
    Languages,

    /// One button per room in the floor plan.
    Rooms,
}

/// Port for outbound messaging.
#[async_trait]
pub trait MessageGateway: Send + Sync {
    /// Sends a direct message to a guest.
    ///
    /// # Errors
    /// Returns `GatewayError` when the platform rejects the send, e.g. the
    /// guest blocked the bot.
    async fn send_guest_message(
        &self,
        guest: &GuestId,
        text: &str,
        keyboard: GuestKeyboard,
    ) -> Result<(), GatewayError>;

    /// Posts a message to a staff channel and returns its locator.
    ///
    /// When `resolve_action` is set the gateway attaches a resolve button
    /// carrying that ticket id.
    ///
    /// # Errors
    /// Returns `GatewayError` when the channel is unreachable.
    async fn send_staff_message(
        &self,
        channel: &ChannelId,
        text: &str,
        resolve_action: Option<&TicketId>,
    ) -> Result<StaffReference, GatewayError>;

    /// Posts a reply threaded under an earlier staff message.
    ///
    /// # Errors
    /// Returns `GatewayError` when the platform rejects the send.
    async fn send_threaded_reply(
        &self,
        reference: &StaffReference,
        text: &str,
    ) -> Result<(), GatewayError>;
}
