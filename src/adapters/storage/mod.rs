//! Storage adapters for the ticket store port.

mod file_ticket_store;
mod in_memory_ticket_store;
mod ledger;

pub use file_ticket_store::FileTicketStore;
pub use in_memory_ticket_store::InMemoryTicketStore;
