//! Unified error type for snapbridge.
//!
//! All crates funnel their failures into [`Error`], which carries enough
//! context for HTTP handlers to derive a status code via [`Error::http_status`].

use std::fmt;

/// Unified error type covering every failure mode in snapbridge.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The upload request carried no `image` file field at all.
    #[error("没有文件")]
    MissingFile,

    /// The `image` field was present but its filename was empty.
    #[error("没有选择文件")]
    NoFileSelected,

    /// The requested entity could not be found.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// The kind of entity (e.g. "image").
        entity: String,
        /// The identifier that was looked up.
        id: String,
    },

    /// The request body exceeded the configured upload limit.
    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    /// An I/O operation on the upload directory failed.
    #[error("IO error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Configuration or request data failed validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected internal errors.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Map this error to an appropriate HTTP status code.
    pub fn http_status(&self) -> u16 {
        match self {
            Error::MissingFile => 400,
            Error::NoFileSelected => 400,
            Error::NotFound { .. } => 404,
            Error::PayloadTooLarge(_) => 413,
            Error::Io { .. } => 500,
            Error::Validation(_) => 400,
            Error::Internal(_) => 500,
        }
    }

    /// Whether this is an upload rejection reported back to the client as
    /// an unsuccessful result rather than as a failed request.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Error::MissingFile | Error::NoFileSelected)
    }

    /// Convenience constructor for [`Error::NotFound`].
    pub fn not_found(entity: impl Into<String>, id: impl fmt::Display) -> Self {
        Error::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }
}

/// Result alias using the crate-level [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
