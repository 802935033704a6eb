//! Error types shared across the crate.

use thiserror::Error;

use crate::state::{SaveEvent, SaveStatus};

/// Errors from reading or writing the wire format.
#[derive(Debug, Error)]
pub enum CropValueError {
    /// The stored text is not valid JSON.
    #[error("Stored crop value is not valid JSON: {0}")]
    Parse(#[source] serde_json::Error),

    /// The value could not be written out.
    #[error("Failed to serialize crop value: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Errors from reading editor settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config text is not valid JSON or has the wrong field types.
    #[error("Invalid editor config: {0}")]
    Parse(#[source] serde_json::Error),
}

/// Errors from the save-status state machine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("Invalid save transition: from {from:?} using event {event:?}")]
    InvalidSaveTransition { from: SaveStatus, event: SaveEvent },
}

pub type StateResult<T> = std::result::Result<T, StateError>;

/// Failures reported by the host collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    /// Reading the stored value failed.
    #[error("Failed to load value from host: {0}")]
    Load(String),

    /// Writing the value failed.
    #[error("Failed to save value to host: {0}")]
    Save(String),

    /// The client could not be initialized.
    #[error("Failed to connect to host after {attempts} attempt(s): {message}")]
    ConnectFailed { attempts: u32, message: String },

    /// The media search round trip failed.
    #[error("Media search failed: {0}")]
    Search(String),
}

/// Errors from a save round trip through [`crate::state::CropEditor`].
#[derive(Debug, Error)]
pub enum SaveError {
    #[error(transparent)]
    State(#[from] StateError),

    #[error(transparent)]
    Value(#[from] CropValueError),

    #[error(transparent)]
    Host(#[from] HostError),
}
