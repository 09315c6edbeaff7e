//! Recording Message Gateway Adapter
//!
//! Captures every outbound message instead of sending it, with switches to
//! simulate unreachable guests and channels. Backs the unit and integration
//! tests; also handy as a dry-run gateway in development.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;

use crate::domain::foundation::{ChannelId, GuestId, MessageId, TicketId};
use crate::domain::ticket::StaffReference;
use crate::ports::{GatewayError, GuestKeyboard, MessageGateway};

/// A captured direct message to a guest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedGuestMessage {
    pub guest: GuestId,
    pub text: String,
    pub keyboard: GuestKeyboard,
}

/// A captured staff channel post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedStaffMessage {
    pub channel: ChannelId,
    pub text: String,
    pub resolve_action: Option<TicketId>,
    pub reference: StaffReference,
}

/// A captured threaded reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedThreadedReply {
    pub reference: StaffReference,
    pub text: String,
}

/// Gateway that records instead of delivering.
#[derive(Debug, Default)]
pub struct RecordingGateway {
    guest_messages: Mutex<Vec<RecordedGuestMessage>>,
    staff_messages: Mutex<Vec<RecordedStaffMessage>>,
    threaded_replies: Mutex<Vec<RecordedThreadedReply>>,
    unreachable_guests: Mutex<HashSet<GuestId>>,
    unreachable_channels: Mutex<HashSet<ChannelId>>,
    fail_threaded: AtomicBool,
    next_message_id: AtomicU64,
}

impl RecordingGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every send to this guest fail from now on.
    pub fn make_guest_unreachable(&self, guest: GuestId) {
        self.unreachable_guests.lock().unwrap().insert(guest);
    }

    /// Makes every post to this channel fail from now on.
    pub fn make_channel_unreachable(&self, channel: ChannelId) {
        self.unreachable_channels.lock().unwrap().insert(channel);
    }

    /// Makes threaded replies fail from now on.
    pub fn fail_threaded_replies(&self) {
        self.fail_threaded.store(true, Ordering::SeqCst);
    }

    /// All captured guest messages, in send order.
    pub fn guest_messages(&self) -> Vec<RecordedGuestMessage> {
        self.guest_messages.lock().unwrap().clone()
    }

    /// Captured guest message texts for one guest, in send order.
    pub fn guest_texts(&self, guest: &GuestId) -> Vec<String> {
        self.guest_messages
            .lock()
            .unwrap()
            .iter()
            .filter(|m| &m.guest == guest)
            .map(|m| m.text.clone())
            .collect()
    }

    /// All captured staff posts, in send order.
    pub fn staff_messages(&self) -> Vec<RecordedStaffMessage> {
        self.staff_messages.lock().unwrap().clone()
    }

    /// All captured threaded replies, in send order.
    pub fn threaded_replies(&self) -> Vec<RecordedThreadedReply> {
        self.threaded_replies.lock().unwrap().clone()
    }

    fn mint_message_id(&self) -> MessageId {
        let n = self.next_message_id.fetch_add(1, Ordering::SeqCst) + 1;
        MessageId::new(n.to_string()).expect("counter is never empty")
    }
}

#[async_trait]
impl MessageGateway for RecordingGateway {
    async fn send_guest_message(
        &self,
        guest: &GuestId,
        text: &str,
        keyboard: GuestKeyboard,
    ) -> Result<(), GatewayError> {
        if self.unreachable_guests.lock().unwrap().contains(guest) {
            return Err(GatewayError::DeliveryFailed(format!(
                "guest {} unreachable",
                guest
            )));
        }
        self.guest_messages
            .lock()
            .unwrap()
            .push(RecordedGuestMessage {
                guest: guest.clone(),
                text: text.to_string(),
                keyboard,
            });
        Ok(())
    }

    async fn send_staff_message(
        &self,
        channel: &ChannelId,
        text: &str,
        resolve_action: Option<&TicketId>,
    ) -> Result<StaffReference, GatewayError> {
        if self.unreachable_channels.lock().unwrap().contains(channel) {
            return Err(GatewayError::DeliveryFailed(format!(
                "channel {} unreachable",
                channel
            )));
        }
        let reference = StaffReference::new(channel.clone(), self.mint_message_id());
        self.staff_messages
            .lock()
            .unwrap()
            .push(RecordedStaffMessage {
                channel: channel.clone(),
                text: text.to_string(),
                resolve_action: resolve_action.cloned(),
                reference: reference.clone(),
            });
        Ok(reference)
    }

    async fn send_threaded_reply(
        &self,
        reference: &StaffReference,
        text: &str,
    ) -> Result<(), GatewayError> {
        if self.fail_threaded.load(Ordering::SeqCst) {
            return Err(GatewayError::DeliveryFailed(
                "threaded replies disabled".to_string(),
            ));
        }
        self.threaded_replies
            .lock()
            .unwrap()
            .push(RecordedThreadedReply {
                reference: reference.clone(),
                text: text.to_string(),
            });
        Ok(())
    }
}
