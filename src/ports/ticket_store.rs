//! Ticket Store Port - Interface for the durable ticket ledger.
//!
//! The store is the single source of truth for tickets and the only shared
//! mutable resource in the system. Implementations must serialize all
//! mutations (single-writer discipline), and every mutation must be durable
//! before the call returns.

use async_trait::async_trait;

use crate::domain::foundation::{Language, MessageId, RoomNumber, TicketId};
use crate::domain::ticket::{GuestProfile, StaffReference, Ticket};

/// Errors that can occur during ticket store operations.
#[derive(Debug, thiserror::Error)]
pub enum TicketStoreError {
    #[error("Ticket not found: {0}")]
    NotFound(TicketId),

    #[error("Invalid ticket input: {0}")]
    InvalidInput(String),

    #[error("Failed to serialize ticket snapshot: {0}")]
    SerializationFailed(String),

    #[error("Ticket snapshot is corrupt: {0}")]
    CorruptSnapshot(String),

    #[error("IO error: {0}")]
    Io(String),
}

/// Input for creating a ticket.
#[derive(Debug, Clone)]
pub struct NewTicket {
    pub guest: GuestProfile,
    /// Message that carried the issue text; part of the derived id.
    pub origin: MessageId,
    pub room: RoomNumber,
    pub language: Language,
    pub text: String,
}

/// Result of a create call.
#[derive(Debug, Clone)]
pub struct CreateResult {
    pub ticket: Ticket,
    /// False when the derived id already existed and the stored record was
    /// returned unchanged (a retried delivery).
    pub created: bool,
}

/// Outcome of a resolution attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveOutcome {
    /// The ticket was unresolved and is now resolved.
    Applied,

    /// The ticket was already resolved; nothing changed.
    AlreadyResolved,

    /// No ticket with that id exists.
    NotFound,
}

/// Port for the durable ticket ledger.
#[async_trait]
pub trait TicketStore: Send + Sync {
    /// Creates a ticket, or returns the existing one for the same guest
    /// action.
    ///
    /// The id is derived from (guest, origin message); if a ticket with that
    /// id already exists it is returned unmodified with `created: false`.
    /// The record is persisted before this returns.
    ///
    /// # Errors
    /// Returns `TicketStoreError` when validation or persistence fails.
    async fn create(&self, new_ticket: NewTicket) -> Result<CreateResult, TicketStoreError>;

    /// Attaches the staff message reference to a ticket, first writer wins.
    ///
    /// Attaching to a ticket that already has a reference is a no-op; the
    /// first value written is returned either way.
    ///
    /// # Errors
    /// Returns `TicketStoreError::NotFound` for an unknown id.
    async fn attach_staff_reference(
        &self,
        id: &TicketId,
        reference: StaffReference,
    ) -> Result<StaffReference, TicketStoreError>;

    /// Marks a ticket resolved.
    ///
    /// The transition is applied at most once: concurrent calls on the same
    /// id yield exactly one `Applied`, every other call observes
    /// `AlreadyResolved`. The write is durable before this returns.
    ///
    /// # Errors
    /// Returns `TicketStoreError` only for persistence failures; an unknown
    /// id is the `NotFound` outcome, not an error.
    async fn mark_resolved(&self, id: &TicketId) -> Result<ResolveOutcome, TicketStoreError>;

    /// Looks up a ticket by id.
    async fn get(&self, id: &TicketId) -> Result<Option<Ticket>, TicketStoreError>;

    /// Returns all unresolved tickets in creation order.
    async fn list_unresolved(&self) -> Result<Vec<Ticket>, TicketStoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_error_names_the_ticket() {
        let id: TicketId = "g-1_7".parse().unwrap();
        let err = TicketStoreError::NotFound(id);
        assert!(err.to_string().contains("g-1_7"));
    }

    #[test]
    fn corrupt_snapshot_error_mentions_corruption() {
        let err = TicketStoreError::CorruptSnapshot("bad json".to_string());
        assert!(err.to_string().contains("corrupt"));
    }

    #[test]
    fn resolve_outcome_distinguishes_noop() {
        assert_ne!(ResolveOutcome::Applied, ResolveOutcome::AlreadyResolved);
        assert_ne!(ResolveOutcome::Applied, ResolveOutcome::NotFound);
    }
}
