// Errors for the non-real-time surfaces: configuration loading, MIDI
// export, and the CLI. Pattern generation itself never fails; it clamps its
// inputs and returns degenerate patterns instead.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PulseError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("midi encoding error: {0}")]
    Midi(String),

    /// A config field was present but out of range.
    #[error("invalid config field `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },
}

pub type PulseResult<T> = Result<T, PulseError>;
