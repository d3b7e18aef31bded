//! core/error.rs
//! Errors the playback layer can report. All of them are recoverable:
//! the controller logs them and keeps the UI where it was.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    /// Play requested with nothing loaded
    #[error("No media loaded")]
    NoMediaLoaded,

    /// Pause requested while not playing
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Device, codec or engine failure
    #[error("Backend error: {0}")]
    Backend(String),

    /// Volume outside 0..=100
    #[error("Invalid volume: {0} (expected 0..=100)")]
    InvalidArgument(u32),
}

pub type Result<T> = std::result::Result<T, PlaybackError>;
