//! Crate-wide error taxonomy.

use std::io;

use thiserror::Error;
use uuid::Uuid;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The request is well-formed but breaks a library rule, such as a
    /// duplicate playlist title or an out-of-range track index.
    #[error("validation failed: {reason}")]
    Validation { reason: String },

    /// No playlist with this id exists in the library.
    #[error("no playlist with id {id}")]
    NotFound { id: Uuid },

    /// A playlist with zero tracks cannot be loaded for playback.
    #[error("playlist has no tracks")]
    EmptyPlaylist,

    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    /// The user document could not be parsed or serialized.
    #[error("document error: {0}")]
    Document(#[from] serde_json::Error),

    #[error("audio engine error: {0}")]
    Engine(#[from] EngineError),
}

impl Error {
    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation {
            reason: reason.into(),
        }
    }
}

/// Failure reported by an audio backend while opening or decoding a file.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct EngineError(pub String);
