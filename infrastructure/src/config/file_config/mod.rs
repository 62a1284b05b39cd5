//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod cache;
mod connection;
mod logging;
mod output;
mod timeouts;

pub use cache::FileCacheConfig;
pub use connection::FileConnectionConfig;
pub use logging::FileLoggingConfig;
pub use output::{FileOutputConfig, FileOutputFormat};
pub use timeouts::FileTimeoutsConfig;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("timeouts.{0} cannot be 0")]
    ZeroTimeout(&'static str),

    #[error("connection.client_name cannot be empty")]
    EmptyClientName,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Connection defaults
    pub connection: FileConnectionConfig,
    /// Deadlines for remote round-trips
    pub timeouts: FileTimeoutsConfig,
    /// Metadata cache settings
    pub cache: FileCacheConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// Log destination
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        let timeouts = [
            ("completion_secs", self.timeouts.completion_secs),
            ("schema_secs", self.timeouts.schema_secs),
            ("connect_secs", self.timeouts.connect_secs),
        ];
        if let Some((name, _)) = timeouts.iter().find(|(_, secs)| *secs == 0) {
            return Err(ConfigValidationError::ZeroTimeout(*name));
        }

        if self.connection.client_name.trim().is_empty() {
            return Err(ConfigValidationError::EmptyClientName);
        }

        Ok(())
    }
}
