//! Guest Desk - Hotel Guest Issue Desk
//!
//! Guests report room issues through a staged chat conversation; each
//! accepted report becomes a durable ticket, staff channels are notified,
//! and reception resolves tickets with idempotent, ordered notifications
//! back to everyone involved.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
