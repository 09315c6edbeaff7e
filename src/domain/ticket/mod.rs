//! Ticket module - The unit of work guests create and staff resolve.

mod ticket;

pub use ticket::{GuestProfile, StaffReference, Ticket};
