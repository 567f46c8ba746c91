// Error types for the sequencer core

/// Errors produced by the sequencer
///
/// Only `InvalidArgument` and `Unavailable` come out of the core logic itself.
/// The remaining variants belong to the ambient layers (configuration files,
/// export serialization, edit history).
#[derive(Debug, thiserror::Error)]
pub enum SequencerError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Sound unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Nothing to undo")]
    NothingToUndo,

    #[error("Nothing to redo")]
    NothingToRedo,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("RON parse error: {0}")]
    RonParse(#[from] ron::error::SpannedError),

    #[error("RON error: {0}")]
    Ron(#[from] ron::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SequencerError {
    pub(crate) fn out_of_range(what: &str, value: impl std::fmt::Display, limit: usize) -> Self {
        SequencerError::InvalidArgument(format!(
            "{} {} is out of range (must be below {})",
            what, value, limit
        ))
    }
}

pub type Result<T> = std::result::Result<T, SequencerError>;
