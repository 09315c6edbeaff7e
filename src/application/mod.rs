//! Application layer - Orchestration over the domain and the ports.

mod conversation;
mod dispatch;
mod notifications;
mod overview;
mod resolution;

pub use conversation::{ConversationEngine, ConversationError};
pub use dispatch::{DispatchError, DispatchOutcome, Dispatcher, InboundEvent};
pub use notifications::NotificationRouter;
pub use overview::{OverviewError, PendingOverviewHandler, PendingReport};
pub use resolution::{ResolveAck, ResolveError, ResolveTicketHandler};
