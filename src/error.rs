//! Error types for the air-quality core.

use thiserror::Error;

/// Failures reported by the classifier, the series generator and the catalog.
///
/// Every failure is synchronous and final for the call that produced it;
/// callers never receive a partially built result alongside an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    // ---
    pub fn invalid(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
