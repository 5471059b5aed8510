//! Error types and handling for the Seedle directory engine

use thiserror::Error;

/// Main error type for the Seedle directory engine
#[derive(Error, Debug)]
pub enum SeedleError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Dataset fetch errors (HTTP, filesystem)
    #[error("Fetch error: {message}")]
    Fetch { message: String },

    /// Spreadsheet parse errors
    #[error("Parse error: {message}")]
    Parse { message: String },

    /// Cache operation errors
    #[error("Cache error: {message}")]
    Cache { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl SeedleError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new fetch error
    pub fn fetch<S: Into<String>>(message: S) -> Self {
        Self::Fetch {
            message: message.into(),
        }
    }

    /// Create a new parse error
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Create a new cache error
    pub fn cache<S: Into<String>>(message: S) -> Self {
        Self::Cache {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            SeedleError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            SeedleError::Fetch { .. } => {
                "Unable to load the resource datasets. Please check your internet connection."
                    .to_string()
            }
            SeedleError::Parse { message } => {
                format!("Could not read the spreadsheet: {message}")
            }
            SeedleError::Cache { .. } => {
                "Cache operation failed. You may need to clear your cache.".to_string()
            }
            SeedleError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}
