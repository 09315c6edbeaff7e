//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `TicketStore` - durable ticket ledger, the single shared mutable
//!   resource
//! - `MessageGateway` - outbound messaging through the chat platform

mod message_gateway;
mod ticket_store;

pub use message_gateway::{GatewayError, GuestKeyboard, MessageGateway};
pub use ticket_store::{CreateResult, NewTicket, ResolveOutcome, TicketStore, TicketStoreError};
