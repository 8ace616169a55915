//! Crate error type
//!
//! Game outcomes (missed discs, wrong picks) are not errors. These cover the
//! faults around the simulation: lifecycle misuse, storage and config.

use thiserror::Error;

/// Errors surfaced by the game and its collaborators
#[derive(Debug, Error)]
pub enum Error {
    /// `start` was called while a run is still active
    #[error("a run is already in progress; stop it before starting another")]
    RunInProgress,

    /// No storage backend is available (e.g. LocalStorage disabled)
    #[error("storage is unavailable")]
    StorageUnavailable,

    /// The backend refused a write
    #[error("failed to write storage key `{key}`")]
    StorageWrite { key: String },

    /// A value could not be encoded for storage
    #[error("failed to encode `{key}`: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Tuning overrides were not valid JSON
    #[error("invalid tuning: {0}")]
    Tuning(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
