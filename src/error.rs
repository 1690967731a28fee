//! Error type shared by the journal core.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by the journal core.
#[derive(Error, Debug)]
pub enum JournalError {
    /// A record file could not be read or written.
    #[error("IO error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A record file exists but does not hold the expected JSON.
    #[error("Malformed record file {}: {source}", .path.display())]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A color string that is not `#rrggbb`.
    #[error("Invalid color '{0}'")]
    InvalidColor(String),

    /// Usernames name files on disk, so only a safe subset is accepted.
    #[error("Invalid username '{0}': use letters, digits, '-', '_' or '.'")]
    InvalidUsername(String),

    #[error("Password must not be empty")]
    InvalidPassword,

    /// Blank mood text.
    #[error("Mood text must not be empty")]
    InputRejected,

    /// Gradient rendering needs at least one stop.
    #[error("Cannot render a gradient without colors")]
    EmptyRenderInput,

    #[error("Gradient dimensions must be non-zero (got {width}x{height})")]
    InvalidDimensions { width: u32, height: u32 },

    /// PNG encoding failure.
    #[error("Image encoding error: {0}")]
    Encode(#[from] image::ImageError),
}

impl JournalError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn format(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Format {
            path: path.into(),
            source,
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, JournalError>;
