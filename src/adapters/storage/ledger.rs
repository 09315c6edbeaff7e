//! Ordered in-memory ticket ledger.
//!
//! Both store adapters keep their working set in this structure: a vector in
//! creation order plus an id index. The ledger itself is synchronous and
//! unsynchronized; the owning adapter provides the single-writer lock.

use std::collections::HashMap;

use crate::domain::foundation::TicketId;
use crate::domain::ticket::{StaffReference, Ticket};
use crate::ports::ResolveOutcome;

#[derive(Debug, Default)]
pub(crate) struct TicketLedger {
    tickets: Vec<Ticket>,
    index: HashMap<TicketId, usize>,
}

impl TicketLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a ledger from a persisted snapshot, preserving order.
    ///
    /// Duplicate ids mean the snapshot was tampered with or corrupted.
    pub fn from_snapshot(tickets: Vec<Ticket>) -> Result<Self, String> {
        let mut ledger = Self::new();
        for ticket in tickets {
            if ledger.index.contains_key(&ticket.id) {
                return Err(format!("duplicate ticket id '{}'", ticket.id));
            }
            ledger.push(ticket);
        }
        Ok(ledger)
    }

    fn push(&mut self, ticket: Ticket) {
        self.index.insert(ticket.id.clone(), self.tickets.len());
        self.tickets.push(ticket);
    }

    pub fn get(&self, id: &TicketId) -> Option<&Ticket> {
        self.index.get(id).map(|&i| &self.tickets[i])
    }

    fn get_mut(&mut self, id: &TicketId) -> Option<&mut Ticket> {
        let i = *self.index.get(id)?;
        Some(&mut self.tickets[i])
    }

    /// Inserts a ticket unless its id already exists.
    ///
    /// Returns the stored ticket and whether it was freshly inserted.
    pub fn insert(&mut self, ticket: Ticket) -> (Ticket, bool) {
        if let Some(existing) = self.get(&ticket.id) {
            return (existing.clone(), false);
        }
        let stored = ticket.clone();
        self.push(ticket);
        (stored, true)
    }

    /// Removes the most recently inserted ticket. Used to roll back an
    /// insert whose persistence failed.
    pub fn pop_last(&mut self) {
        if let Some(ticket) = self.tickets.pop() {
            self.index.remove(&ticket.id);
        }
    }

    /// Sets the staff reference, first writer wins.
    ///
    /// Returns the reference now on record, or `None` for an unknown id.
    pub fn attach_reference(
        &mut self,
        id: &TicketId,
        reference: StaffReference,
    ) -> Option<StaffReference> {
        let ticket = self.get_mut(id)?;
        if ticket.staff_reference.is_none() {
            ticket.staff_reference = Some(reference);
        }
        ticket.staff_reference.clone()
    }

    /// Clears the staff reference. Rollback path for a failed persist.
    pub fn detach_reference(&mut self, id: &TicketId) {
        if let Some(ticket) = self.get_mut(id) {
            ticket.staff_reference = None;
        }
    }

    /// Applies the resolved transition at most once.
    pub fn mark_resolved(&mut self, id: &TicketId) -> ResolveOutcome {
        match self.get_mut(id) {
            None => ResolveOutcome::NotFound,
            Some(ticket) if ticket.resolved => ResolveOutcome::AlreadyResolved,
            Some(ticket) => {
                ticket.resolved = true;
                ResolveOutcome::Applied
            }
        }
    }

    /// Reverts the resolved flag. Rollback path for a failed persist.
    pub fn unmark_resolved(&mut self, id: &TicketId) {
        if let Some(ticket) = self.get_mut(id) {
            ticket.resolved = false;
        }
    }

    /// Unresolved tickets in creation order.
    pub fn unresolved(&self) -> Vec<Ticket> {
        self.tickets.iter().filter(|t| !t.resolved).cloned().collect()
    }

    /// Full snapshot in creation order, for persistence.
    pub fn snapshot(&self) -> &[Ticket] {
        &self.tickets
    }
}
