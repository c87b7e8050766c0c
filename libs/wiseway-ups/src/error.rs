//! Error handling for the wiseway-ups library
//!
//! Parsing and checking never fail (degradations are folded into UNKNOWN
//! results); errors only arise at the configuration and I/O surface.

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, UpsError>;

/// Errors from the configuration and input surface
#[derive(Debug, Error)]
pub enum UpsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parameter file error: {0}")]
    Params(#[from] serde_yaml::Error),

    #[error("Unknown profile: {0}")]
    UnknownProfile(String),

    #[error("Unknown check plugin: {0}")]
    UnknownPlugin(String),
}
