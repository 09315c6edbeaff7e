//! The per-guest intake conversation engine.
//!
//! Owns the ephemeral conversation state map, drives guests through the
//! language, room, issue sequence, and hands completed submissions to the
//! ticket store. The state map is partitioned by guest and the gateway
//! serializes each guest's events, so the only cross-guest contention is on
//! the map itself.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::application::NotificationRouter;
use crate::domain::conversation::{ConversationStage, ConversationState};
use crate::domain::foundation::{GuestId, Language, MessageId, RoomNumber};
use crate::domain::localization::MessageKey;
use crate::domain::ticket::{GuestProfile, Ticket};
use crate::ports::{NewTicket, TicketStore, TicketStoreError};

/// Errors that abort a conversation step.
///
/// Only persistence failures qualify; every other irregular input is
/// answered with a prompt or silently ignored.
#[derive(Debug, thiserror::Error)]
pub enum ConversationError {
    #[error("ticket persistence failed: {0}")]
    Store(#[from] TicketStoreError),
}

/// Result of applying a selection to the state map.
enum Advance {
    /// Transition applied; carries the language known afterwards.
    Advanced(Option<Language>),

    /// Active conversation, but the selection does not fit its stage.
    WrongStage,

    /// No active conversation for this guest.
    NoConversation,
}

/// Drives the intake conversation for every guest.
pub struct ConversationEngine {
    states: RwLock<HashMap<GuestId, ConversationState>>,
    store: Arc<dyn TicketStore>,
    router: Arc<NotificationRouter>,
}

impl ConversationEngine {
    pub fn new(store: Arc<dyn TicketStore>, router: Arc<NotificationRouter>) -> Self {
        Self {
            states: RwLock::new(HashMap::new()),
            store,
            router,
        }
    }

    /// Starts (or restarts) a conversation.
    ///
    /// Always lands in the language stage, whatever came before.
    pub async fn begin(&self, guest: &GuestId) {
        self.states
            .write()
            .await
            .insert(guest.clone(), ConversationState::begin());
        info!(guest = %guest, "conversation started");
        self.router.prompt_language(guest).await;
    }

    /// Applies a language selection from the gateway.
    ///
    /// Only meaningful in the language stage. Unknown codes and wrong-stage
    /// selections are ignored without a reply, since the keyboard only
    /// offers valid choices and stale taps are expected. A selection with
    /// no conversation at all gets a restart prompt.
    pub async fn supply_language(&self, guest: &GuestId, code: &str) {
        let language: Language = match code.parse() {
            Ok(language) => language,
            Err(_) => {
                debug!(guest = %guest, code, "ignoring unknown language code");
                return;
            }
        };

        match self.advance(guest, |s| s.choose_language(language)).await {
            Advance::Advanced(_) => self.router.prompt_room(guest, language).await,
            Advance::WrongStage => {
                debug!(guest = %guest, "ignoring language selection outside language stage");
            }
            Advance::NoConversation => {
                self.router
                    .notify_guest(guest, MessageKey::RestartRequired, None)
                    .await;
            }
        }
    }

    /// Applies a room selection from the gateway. Same rules as language.
    pub async fn supply_room(&self, guest: &GuestId, room: &str) {
        let room: RoomNumber = match room.parse() {
            Ok(room) => room,
            Err(_) => {
                debug!(guest = %guest, room, "ignoring invalid room selection");
                return;
            }
        };

        match self.advance(guest, |s| s.choose_room(room)).await {
            Advance::Advanced(Some(language)) => self.router.prompt_issue(guest, language).await,
            Advance::Advanced(None) | Advance::WrongStage => {
                debug!(guest = %guest, "ignoring room selection outside room stage");
            }
            Advance::NoConversation => {
                self.router
                    .notify_guest(guest, MessageKey::RestartRequired, None)
                    .await;
            }
        }
    }

    /// Applies a pure transition to the guest's state under the map lock.
    async fn advance(
        &self,
        guest: &GuestId,
        transition: impl FnOnce(&ConversationState) -> Option<ConversationState>,
    ) -> Advance {
        let mut states = self.states.write().await;
        match states.get(guest) {
            None => Advance::NoConversation,
            Some(state) => match transition(state) {
                Some(next) => {
                    let language = next.language();
                    states.insert(guest.clone(), next);
                    Advance::Advanced(language)
                }
                None => Advance::WrongStage,
            },
        }
    }

    /// Accepts the free-form issue text and, when the conversation is
    /// complete, files the ticket.
    ///
    /// Empty text re-prompts without losing the conversation. Text arriving
    /// mid-selection abandons the conversation and asks the guest to start
    /// over. On success the ticket is persisted first, then staff are
    /// announced and the guest acknowledged; the conversation ends either
    /// way.
    ///
    /// # Errors
    /// Returns `ConversationError::Store` when persistence fails; the
    /// conversation is kept so the guest can resend.
    pub async fn supply_issue_text(
        &self,
        guest: &GuestProfile,
        origin: &MessageId,
        text: &str,
    ) -> Result<Option<Ticket>, ConversationError> {
        let guest_id = &guest.guest_id;
        let state = self.states.read().await.get(guest_id).copied();

        let Some(state) = state else {
            self.router
                .notify_guest(guest_id, MessageKey::RestartRequired, None)
                .await;
            return Ok(None);
        };

        let Some((language, room)) = state.submission_fields() else {
            // Free text while a selection is pending cannot be satisfied;
            // treat it as abandonment, not an error.
            self.states.write().await.remove(guest_id);
            self.router
                .notify_guest(guest_id, MessageKey::RestartRequired, state.language())
                .await;
            return Ok(None);
        };

        if text.trim().is_empty() {
            self.router.prompt_issue(guest_id, language).await;
            return Ok(None);
        }

        let result = self
            .store
            .create(NewTicket {
                guest: guest.clone(),
                origin: origin.clone(),
                room,
                language,
                text: text.to_string(),
            })
            .await?;

        self.states.write().await.remove(guest_id);

        if result.created {
            info!(
                ticket_id = %result.ticket.id,
                room = %room,
                guest = %guest_id,
                "ticket created"
            );
            if let Some(reference) = self.router.announce_new_ticket(&result.ticket).await {
                if let Err(err) = self
                    .store
                    .attach_staff_reference(&result.ticket.id, reference)
                    .await
                {
                    // The ticket exists and staff saw it; only the thread
                    // target is lost.
                    tracing::error!(
                        ticket_id = %result.ticket.id,
                        error = %err,
                        "failed to record staff reference"
                    );
                }
            }
        } else {
            info!(ticket_id = %result.ticket.id, "duplicate submission, reusing ticket");
        }

        self.router
            .notify_guest(guest_id, MessageKey::AckGuest, Some(language))
            .await;

        Ok(Some(result.ticket))
    }

    /// Abandons the conversation, from any stage.
    pub async fn cancel(&self, guest: &GuestId) {
        let removed = self.states.write().await.remove(guest);
        info!(guest = %guest, "conversation cancelled");
        self.router
            .notify_guest(
                guest,
                MessageKey::Cancelled,
                removed.and_then(|s| s.language()),
            )
            .await;
    }

    /// Stage of the guest's active conversation, if one exists.
    pub async fn active_stage(&self, guest: &GuestId) -> Option<ConversationStage> {
        self.states.read().await.get(guest).map(|s| s.stage())
    }
}
