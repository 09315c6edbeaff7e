//! In-Memory Ticket Store Adapter
//!
//! Same semantics as the file-backed store without the durability.
//! Useful for testing and development.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::ledger::TicketLedger;
use crate::domain::foundation::TicketId;
use crate::domain::ticket::{StaffReference, Ticket};
use crate::ports::{CreateResult, NewTicket, ResolveOutcome, TicketStore, TicketStoreError};

/// Volatile ticket store for tests and development.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTicketStore {
    inner: Arc<Mutex<TicketLedger>>,
}

impl InMemoryTicketStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tickets held, resolved or not.
    pub async fn len(&self) -> usize {
        self.inner.lock().await.snapshot().len()
    }

    /// True when no tickets are held.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl TicketStore for InMemoryTicketStore {
    async fn create(&self, new_ticket: NewTicket) -> Result<CreateResult, TicketStoreError> {
        let ticket = Ticket::new(
            new_ticket.guest,
            &new_ticket.origin,
            new_ticket.room,
            new_ticket.language,
            new_ticket.text,
        )
        .map_err(|e| TicketStoreError::InvalidInput(e.to_string()))?;

        let mut ledger = self.inner.lock().await;
        let (stored, created) = ledger.insert(ticket);
        Ok(CreateResult {
            ticket: stored,
            created,
        })
    }

    async fn attach_staff_reference(
        &self,
        id: &TicketId,
        reference: StaffReference,
    ) -> Result<StaffReference, TicketStoreError> {
        let mut ledger = self.inner.lock().await;
        ledger
            .attach_reference(id, reference)
            .ok_or_else(|| TicketStoreError::NotFound(id.clone()))
    }

    async fn mark_resolved(&self, id: &TicketId) -> Result<ResolveOutcome, TicketStoreError> {
        let mut ledger = self.inner.lock().await;
        Ok(ledger.mark_resolved(id))
    }

    async fn get(&self, id: &TicketId) -> Result<Option<Ticket>, TicketStoreError> {
        let ledger = self.inner.lock().await;
        Ok(ledger.get(id).cloned())
    }

    async fn list_unresolved(&self) -> Result<Vec<Ticket>, TicketStoreError> {
        let ledger = self.inner.lock().await;
        Ok(ledger.unresolved())
    }
}
