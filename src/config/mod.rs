//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Variables carry the `GUEST_DESK` prefix
//! and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use guest_desk::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod desk;
mod error;
mod roles;
mod storage;

pub use desk::DeskConfig;
pub use error::{ConfigError, ValidationError};
pub use roles::RolesConfig;
pub use storage::StorageConfig;

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Ticket snapshot location
    #[serde(default)]
    pub storage: StorageConfig,

    /// Staff channels
    pub desk: DeskConfig,

    /// Fixed role lists
    pub roles: RolesConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with the `GUEST_DESK` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Parses list values as comma-separated
    ///
    /// # Environment Variable Format
    ///
    /// - `GUEST_DESK__STORAGE__DB_PATH=/var/lib/desk/tickets.json`
    /// - `GUEST_DESK__DESK__STAFF_CHANNELS=-100265,-100999`
    /// - `GUEST_DESK__ROLES__RECEPTION=430932662`
    /// - `GUEST_DESK__ROLES__OVERVIEW=1746109123`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or cannot be
    /// parsed into the expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("GUEST_DESK")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("desk.staff_channels")
                    .with_list_parse_key("roles.reception")
                    .with_list_parse_key("roles.overview"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.storage.db_path.as_os_str().is_empty() {
            return Err(ValidationError::EmptyDbPath);
        }

        if self.desk.staff_channels.is_empty() {
            return Err(ValidationError::NoStaffChannels);
        }
        if self
            .desk
            .staff_channels
            .iter()
            .any(|c| c.as_str().is_empty())
        {
            return Err(ValidationError::EmptyStaffChannel);
        }

        if self.roles.reception.is_empty() {
            return Err(ValidationError::NoReceptionActors);
        }
        if self
            .roles
            .reception
            .iter()
            .chain(self.roles.overview.iter())
            .any(|a| a.as_str().is_empty())
        {
            return Err(ValidationError::EmptyActorId);
        }

        Ok(())
    }
}
