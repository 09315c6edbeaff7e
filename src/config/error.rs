//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("No staff channels configured")]
    NoStaffChannels,

    #[error("Staff channel id cannot be empty")]
    EmptyStaffChannel,

    #[error("No reception actors configured")]
    NoReceptionActors,

    #[error("Actor id cannot be empty")]
    EmptyActorId,

    #[error("Ticket database path cannot be empty")]
    EmptyDbPath,
}
