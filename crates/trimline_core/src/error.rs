use crate::types::ClipId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Clip not found: {0}")]
    ClipNotFound(ClipId),

    #[error("Invalid clip: {0}")]
    InvalidClip(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Nothing to undo")]
    NothingToUndo,

    #[error("Nothing to redo")]
    NothingToRedo,
}

pub type Result<T> = std::result::Result<T, CoreError>;

/// Why a proposed trim was refused.
///
/// A rejection never carries partial effects: the caller keeps the timeline
/// as it was and leaves the drag clamped at the last accepted value.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum TrimRejection {
    #[error("clip would be {duration:.3}s long, minimum is {min:.3}s")]
    DurationTooShort { duration: f64, min: f64 },

    #[error("source window {start:.3}..{end:.3}s is outside the source media (duration {source_duration:?})")]
    BeyondSourceBounds {
        start: f64,
        end: f64,
        source_duration: Option<f64>,
    },
}
