//! Unresolved ticket overview for privileged staff.

use std::collections::HashSet;
use std::fmt::Write as _;
use std::sync::Arc;
use tracing::warn;

use crate::domain::foundation::ActorId;
use crate::domain::ticket::Ticket;
use crate::ports::{TicketStore, TicketStoreError};

/// Errors surfaced to the requesting actor.
#[derive(Debug, thiserror::Error)]
pub enum OverviewError {
    #[error("Actor {actor} is not authorized to view the overview")]
    Unauthorized { actor: ActorId },

    #[error(transparent)]
    Store(#[from] TicketStoreError),
}

/// Unresolved tickets in creation order, with a rendered report.
#[derive(Debug, Clone)]
pub struct PendingReport {
    pub tickets: Vec<Ticket>,
}

impl PendingReport {
    pub fn new(tickets: Vec<Ticket>) -> Self {
        Self { tickets }
    }

    /// One line per open ticket: id, room, reporter, text.
    pub fn render(&self) -> String {
        if self.tickets.is_empty() {
            return "Barcha muammolar hal qilindi ✅".to_string();
        }

        let mut out = String::from("❗️ Hal bo‘lmagan muammolar:");
        for ticket in &self.tickets {
            let _ = write!(
                out,
                "\n• ID {} | Xona {} | {}: {}",
                ticket.id, ticket.room, ticket.guest.display_name, ticket.text
            );
        }
        out
    }
}

/// Read-only view of the open ticket backlog.
pub struct PendingOverviewHandler {
    store: Arc<dyn TicketStore>,
    overview: HashSet<ActorId>,
}

impl PendingOverviewHandler {
    pub fn new(
        store: Arc<dyn TicketStore>,
        overview: impl IntoIterator<Item = ActorId>,
    ) -> Self {
        Self {
            store,
            overview: overview.into_iter().collect(),
        }
    }

    /// Lists unresolved tickets for a privileged actor.
    ///
    /// # Errors
    /// `Unauthorized` for actors outside the overview role set; `Store`
    /// when the ledger cannot be read.
    pub async fn list_pending(&self, actor: &ActorId) -> Result<PendingReport, OverviewError> {
        if !self.overview.contains(actor) {
            warn!(actor = %actor, "unauthorized overview request");
            return Err(OverviewError::Unauthorized {
                actor: actor.clone(),
            });
        }

        let tickets = self.store.list_unresolved().await?;
        Ok(PendingReport::new(tickets))
    }
}
