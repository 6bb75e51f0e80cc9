use std::fmt;

use cabinet_core::ConfigError;
use cabinet_rest::{ClientError, RestError};

/// Errors raised by [`DirectoryContext`](crate::DirectoryContext).
#[derive(Debug)]
pub enum DirectoryError {
    /// Configuration could not be read.
    Config(ConfigError),
    /// The REST client could not be built.
    Client(ClientError),
    /// A query failed.
    Rest(RestError),
}

impl fmt::Display for DirectoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DirectoryError::Config(e) => write!(f, "Directory configuration error: {}", e),
            DirectoryError::Client(e) => write!(f, "Directory client error: {}", e),
            DirectoryError::Rest(e) => write!(f, "Directory query failed: {}", e),
        }
    }
}

impl std::error::Error for DirectoryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DirectoryError::Config(e) => Some(e),
            DirectoryError::Client(e) => Some(e),
            DirectoryError::Rest(e) => Some(e),
        }
    }
}

impl From<ConfigError> for DirectoryError {
    fn from(err: ConfigError) -> Self {
        DirectoryError::Config(err)
    }
}

impl From<ClientError> for DirectoryError {
    fn from(err: ClientError) -> Self {
        DirectoryError::Client(err)
    }
}

impl From<RestError> for DirectoryError {
    fn from(err: RestError) -> Self {
        DirectoryError::Rest(err)
    }
}
