//! Error types for the Tidepool engine
//!
//! Geometry and simulation code is infallible: bad numeric input is
//! clamped at the configuration boundary instead of surfacing here.
//! Only configuration parsing and file IO can fail.

use thiserror::Error;

/// Main error type for the engine
#[derive(Debug, Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
