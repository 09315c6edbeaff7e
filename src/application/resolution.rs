//! Ticket resolution, authorized and idempotent.
//!
//! The resolved flag is persisted before any notification goes out, so a
//! crash mid-notification still leaves the ticket correctly marked and a
//! retried resolve lands on the no-op path.

use std::collections::HashSet;
use std::sync::Arc;
use tracing::{info, warn};

use crate::application::NotificationRouter;
use crate::domain::foundation::{ActorId, TicketId};
use crate::domain::localization::MessageKey;
use crate::ports::{ResolveOutcome, TicketStore, TicketStoreError};

/// Errors surfaced to the resolving actor.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("Actor {actor} is not authorized to resolve tickets")]
    Unauthorized { actor: ActorId },

    #[error("Ticket not found: {ticket_id}")]
    NotFound { ticket_id: TicketId },

    #[error(transparent)]
    Store(#[from] TicketStoreError),
}

/// Successful resolution outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveAck {
    /// The ticket transitioned to resolved and all parties were notified.
    Resolved,

    /// The ticket was already resolved; nothing was sent to anyone. The
    /// gateway may still show the actor an acknowledgment.
    AlreadyResolved,
}

/// Applies the resolved transition on behalf of reception staff.
pub struct ResolveTicketHandler {
    store: Arc<dyn TicketStore>,
    router: Arc<NotificationRouter>,
    reception: HashSet<ActorId>,
}

impl ResolveTicketHandler {
    pub fn new(
        store: Arc<dyn TicketStore>,
        router: Arc<NotificationRouter>,
        reception: impl IntoIterator<Item = ActorId>,
    ) -> Self {
        Self {
            store,
            router,
            reception: reception.into_iter().collect(),
        }
    }

    /// Resolves a ticket.
    ///
    /// Authorization comes first; an actor outside the reception role set
    /// changes nothing and triggers no notifications. For an authorized
    /// actor the transition is applied at most once; repeat calls return
    /// `AlreadyResolved` silently.
    ///
    /// # Errors
    /// `Unauthorized` and `NotFound` are actor-visible denials. `Store`
    /// means the resolved write itself failed and the operation must be
    /// retried.
    pub async fn resolve(
        &self,
        actor: &ActorId,
        ticket_id: &TicketId,
    ) -> Result<ResolveAck, ResolveError> {
        if !self.reception.contains(actor) {
            warn!(actor = %actor, ticket_id = %ticket_id, "unauthorized resolve attempt");
            return Err(ResolveError::Unauthorized {
                actor: actor.clone(),
            });
        }

        let ticket = self
            .store
            .get(ticket_id)
            .await?
            .ok_or_else(|| ResolveError::NotFound {
                ticket_id: ticket_id.clone(),
            })?;

        match self.store.mark_resolved(ticket_id).await? {
            ResolveOutcome::NotFound => Err(ResolveError::NotFound {
                ticket_id: ticket_id.clone(),
            }),
            ResolveOutcome::AlreadyResolved => {
                info!(ticket_id = %ticket_id, actor = %actor, "resolve repeated, no-op");
                Ok(ResolveAck::AlreadyResolved)
            }
            ResolveOutcome::Applied => {
                info!(ticket_id = %ticket_id, actor = %actor, "ticket resolved");

                // Resolved is durable at this point; everything below is
                // best-effort.
                self.router
                    .notify_guest(
                        &ticket.guest.guest_id,
                        MessageKey::ProcessingNotice,
                        Some(ticket.language),
                    )
                    .await;

                match &ticket.staff_reference {
                    Some(reference) => {
                        self.router.notify_staff_resolved(reference, ticket_id).await;
                    }
                    None => {
                        warn!(
                            ticket_id = %ticket_id,
                            "no staff reference on record, skipping thread confirmation"
                        );
                    }
                }

                self.router
                    .notify_guest(
                        &ticket.guest.guest_id,
                        MessageKey::ResolvedNotice,
                        Some(ticket.language),
                    )
                    .await;

                Ok(ResolveAck::Resolved)
            }
        }
    }
}
