//! Inbound event dispatch.
//!
//! The gateway turns platform updates into `InboundEvent`s and feeds them
//! here one at a time per guest; events for different guests and staff
//! actions may arrive concurrently. The outcome tells the gateway what, if
//! anything, it still has to show the initiating actor; guest-facing
//! messages have already been sent by the handlers.

use std::sync::Arc;

use crate::application::{
    ConversationEngine, ConversationError, OverviewError, PendingOverviewHandler, PendingReport,
    ResolveAck, ResolveError, ResolveTicketHandler,
};
use crate::domain::foundation::{ActorId, GuestId, MessageId, TicketId};
use crate::domain::ticket::{GuestProfile, Ticket};
use crate::ports::TicketStoreError;

/// One event from the chat platform.
#[derive(Debug, Clone)]
pub enum InboundEvent {
    /// The guest asked to start a new report.
    ConversationStart { guest: GuestId },

    /// The guest tapped a language button; the code is the raw payload.
    LanguageChosen { guest: GuestId, code: String },

    /// The guest tapped a room button; the payload is the raw room label.
    RoomChosen { guest: GuestId, room: String },

    /// The guest sent free-form text.
    TextMessage {
        guest: GuestProfile,
        origin: MessageId,
        text: String,
    },

    /// The guest abandoned the current report.
    CancelRequested { guest: GuestId },

    /// A staff actor pressed the resolve button on a ticket.
    ResolveRequested { actor: ActorId, ticket_id: TicketId },

    /// A staff actor asked for the unresolved backlog.
    PendingRequested { actor: ActorId },
}

/// What the gateway still owes the initiating actor.
#[derive(Debug, Clone)]
pub enum DispatchOutcome {
    /// Handled; all replies were already sent by the core.
    Accepted,

    /// A ticket was filed (or an earlier one matched a retried delivery).
    TicketFiled(Ticket),

    /// The ticket is now resolved.
    ResolveApplied,

    /// The ticket was already resolved; nothing was re-sent.
    ResolveNoOp,

    /// Show a denial to this actor only.
    ResolveDenied { actor: ActorId },

    /// Tell the actor the ticket does not exist.
    ResolveUnknown { ticket_id: TicketId },

    /// Render the backlog report for the actor.
    Pending(PendingReport),

    /// Show an overview denial to this actor only.
    PendingDenied { actor: ActorId },
}

/// Errors that abort event handling.
///
/// Only persistence failures land here; they must be surfaced to the
/// initiating actor so the report or resolution is not silently lost.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error(transparent)]
    Store(#[from] TicketStoreError),
}

/// Routes inbound events to the owning handler.
pub struct Dispatcher {
    engine: Arc<ConversationEngine>,
    resolver: Arc<ResolveTicketHandler>,
    overview: Arc<PendingOverviewHandler>,
}

impl Dispatcher {
    pub fn new(
        engine: Arc<ConversationEngine>,
        resolver: Arc<ResolveTicketHandler>,
        overview: Arc<PendingOverviewHandler>,
    ) -> Self {
        Self {
            engine,
            resolver,
            overview,
        }
    }

    /// Handles one inbound event.
    ///
    /// # Errors
    /// Returns `DispatchError::Store` when ticket persistence failed and
    /// the actor must be told to retry.
    pub async fn dispatch(&self, event: InboundEvent) -> Result<DispatchOutcome, DispatchError> {
        match event {
            InboundEvent::ConversationStart { guest } => {
                self.engine.begin(&guest).await;
                Ok(DispatchOutcome::Accepted)
            }
            InboundEvent::LanguageChosen { guest, code } => {
                self.engine.supply_language(&guest, &code).await;
                Ok(DispatchOutcome::Accepted)
            }
            InboundEvent::RoomChosen { guest, room } => {
                self.engine.supply_room(&guest, &room).await;
                Ok(DispatchOutcome::Accepted)
            }
            InboundEvent::TextMessage {
                guest,
                origin,
                text,
            } => match self.engine.supply_issue_text(&guest, &origin, &text).await {
                Ok(Some(ticket)) => Ok(DispatchOutcome::TicketFiled(ticket)),
                Ok(None) => Ok(DispatchOutcome::Accepted),
                Err(ConversationError::Store(e)) => Err(e.into()),
            },
            InboundEvent::CancelRequested { guest } => {
                self.engine.cancel(&guest).await;
                Ok(DispatchOutcome::Accepted)
            }
            InboundEvent::ResolveRequested { actor, ticket_id } => {
                match self.resolver.resolve(&actor, &ticket_id).await {
                    Ok(ResolveAck::Resolved) => Ok(DispatchOutcome::ResolveApplied),
                    Ok(ResolveAck::AlreadyResolved) => Ok(DispatchOutcome::ResolveNoOp),
                    Err(ResolveError::Unauthorized { actor }) => {
                        Ok(DispatchOutcome::ResolveDenied { actor })
                    }
                    Err(ResolveError::NotFound { ticket_id }) => {
                        Ok(DispatchOutcome::ResolveUnknown { ticket_id })
                    }
                    Err(ResolveError::Store(e)) => Err(e.into()),
                }
            }
            InboundEvent::PendingRequested { actor } => {
                match self.overview.list_pending(&actor).await {
                    Ok(report) => Ok(DispatchOutcome::Pending(report)),
                    Err(OverviewError::Unauthorized { actor }) => {
                        Ok(DispatchOutcome::PendingDenied { actor })
                    }
                    Err(OverviewError::Store(e)) => Err(e.into()),
                }
            }
        }
    }
}
