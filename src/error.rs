//! Error types for package delivery.

use thiserror::Error;

/// Errors raised while resolving and serving a package request.
///
/// Each variant maps to exactly one HTTP status; the `Io` cause is logged
/// server-side and never echoed to the caller.
#[derive(Error, Debug)]
pub enum DeliveryError {
    /// The requested name failed validation. Detected before any
    /// filesystem access.
    #[error("invalid file name")]
    InvalidName,

    /// The name validated but matched no regular file inside the root.
    #[error("file not found")]
    NotFound,

    /// The file exists but could not be opened or read.
    #[error("internal error: {0}")]
    Io(#[from] std::io::Error),
}

impl DeliveryError {
    /// HTTP status code for this error.
    pub const fn status(&self) -> u16 {
        match self {
            Self::InvalidName => 400,
            Self::NotFound => 404,
            Self::Io(_) => 500,
        }
    }

    /// Client-facing detail message. Intentionally generic for `Io`.
    pub const fn detail(&self) -> &'static str {
        match self {
            Self::InvalidName => "invalid file name",
            Self::NotFound => "file not found",
            Self::Io(_) => "internal error",
        }
    }
}
